// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::tree::{Array, List, Pairs};

/// `key := value | "[" array_body "]" | "<" list_body ">" | "{" pairs_body "}"`
pub(super) fn key<R: Read>(parser: &mut Parser<R>, id: String) -> Result<Key, ConfError> {
    tracing::trace!(%id, "key");

    let token = parser.bump()?;
    if let Some(data) = token_data(&token) {
        return Ok(Key::value(id, data));
    }

    match token {
        Token::LBracket => Ok(Key::array(id, array(parser)?)),
        Token::LAngle => Ok(Key::list(id, list(parser)?)),
        Token::LBrace => Ok(Key::pairs(id, pairs(parser)?)),
        other => Err(parser.unexpected(&other, "Either a value, [, <, or {")),
    }
}

/// `array_body := value ("," value)*`, opening `[` already consumed.
///
/// Positions are assigned sequentially from 0.
fn array<R: Read>(parser: &mut Parser<R>) -> Result<Array, ConfError> {
    let mut array = Array::new();
    let mut index = 0;

    loop {
        let token = parser.bump()?;
        let Some(data) = token_data(&token) else {
            return Err(parser.unexpected(&token, "A value"));
        };
        array.set(index, data);
        index += 1;

        match parser.bump()? {
            Token::Comma => continue,
            Token::RBracket => return Ok(array),
            other => return Err(parser.unexpected(&other, "]")),
        }
    }
}

/// `list_body := (value | "<" list_body ">") ("," (value | "<" list_body ">"))*`,
/// opening `<` already consumed.
///
/// Lists still open sit on an explicit stack, so nesting depth is bounded
/// by memory rather than by the call stack. A nested list joins its parent
/// once its `>` is read.
fn list<R: Read>(parser: &mut Parser<R>) -> Result<List, ConfError> {
    let mut current = List::new();
    let mut parents: Vec<List> = Vec::new();

    loop {
        let token = parser.bump()?;
        if let Some(data) = token_data(&token) {
            current.insert_data(data);
        } else if token == Token::LAngle {
            parents.push(std::mem::take(&mut current));
            tracing::trace!(depth = parents.len() + 1, "list");
            continue;
        } else {
            return Err(parser.unexpected(&token, "A value or a <"));
        }

        // Close as many lists as the input does before the next element.
        loop {
            match parser.bump()? {
                Token::Comma => break,
                Token::RAngle => match parents.pop() {
                    Some(parent) => {
                        let finished = std::mem::replace(&mut current, parent);
                        current.insert_list(finished);
                    }
                    None => return Ok(current),
                },
                other => return Err(parser.unexpected(&other, ">")),
            }
        }
    }
}

/// `pairs_body := (ID "=" value ";")*`, opening `{` already consumed.
///
/// The trailing `;` of the last entry is optional and an empty block is
/// allowed. With [`ParseOptions::retain_pairs`] off, entries are checked but
/// not stored.
fn pairs<R: Read>(parser: &mut Parser<R>) -> Result<Pairs, ConfError> {
    let mut pairs = Pairs::new();

    let mut token = parser.bump()?;
    loop {
        let pair_id = match token {
            Token::RBrace => return Ok(pairs),
            Token::Ident(pair_id) => pair_id,
            other => return Err(parser.unexpected(&other, "An ID")),
        };

        parser.expect(Token::Assign, "=")?;

        let value = parser.bump()?;
        let Some(data) = token_data(&value) else {
            return Err(parser.unexpected(&value, "A value"));
        };
        if parser.options.retain_pairs {
            pairs.insert(pair_id, data);
        } else {
            tracing::trace!(%pair_id, "pair value discarded");
        }

        token = match parser.bump()? {
            Token::Semicolon => parser.bump()?,
            Token::RBrace => return Ok(pairs),
            other => return Err(parser.unexpected(&other, "; or }")),
        };
    }
}
