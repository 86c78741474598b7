// Author: Dustin Pilgrim
// License: MIT

use super::*;
use super::scanner::{bump, class_of, step, unbump, utf8_width, CharClass, State, Step};
use crate::error::LexFault;

/// Run the state machine from the start state until a lexeme is complete,
/// then classify it.
pub(super) fn next_token<R: Read>(lexer: &mut Lexer<R>) -> Result<Token, ConfError> {
    let mut state = State::Start;
    let mut lexeme: Vec<u8> = Vec::new();

    loop {
        if state == State::Start {
            lexeme.clear();
        }

        let byte = bump(lexer)?;
        let class = match byte {
            None => CharClass::Eof,
            Some(b) => match class_of(b) {
                Some(class) => class,
                None if state.is_literal() => CharClass::Other,
                None => return Err(illegal_char(lexer, b)),
            },
        };

        match step(state, class) {
            Step::To(next) => {
                if keeps_byte(next, class) {
                    lexeme.extend(byte);
                }
                state = next;
            }
            Step::Accept => {
                lexeme.extend(byte);
                break;
            }
            Step::Backtrack => {
                unbump(lexer, byte);
                break;
            }
            Step::Fail => {
                let found = if class == CharClass::Eol {
                    LexFault::EndOfLine
                } else {
                    LexFault::EndOfFile
                };
                tracing::debug!(line = lexer.line, %found, "lexeme cut short");
                return Err(ConfError::Lex { line: lexer.line, found });
            }
        }
    }

    let token = classify(&lexeme);
    tracing::trace!(line = lexer.line, %token, "token");
    Ok(token)
}

/// Comment bytes are dropped, and whitespace is only kept inside strings.
fn keeps_byte(next: State, class: CharClass) -> bool {
    match next {
        State::Start | State::Comment => false,
        State::Quoted | State::Escape => true,
        _ => class != CharClass::White,
    }
}

/// Report the character that starts with `lead`. The rest of its UTF-8
/// sequence is read so the error names the whole character; a malformed
/// sequence is reported as the raw lead byte.
fn illegal_char<R: Read>(lexer: &mut Lexer<R>, lead: u8) -> ConfError {
    let mut encoded = vec![lead];
    while encoded.len() < utf8_width(lead) {
        match bump(lexer) {
            Ok(Some(b)) if b & 0xC0 == 0x80 => encoded.push(b),
            Ok(other) => {
                unbump(lexer, other);
                break;
            }
            Err(err) => return err,
        }
    }

    let found = match std::str::from_utf8(&encoded).ok().and_then(|s| s.chars().next()) {
        Some(c) => LexFault::Char(c),
        None => LexFault::Byte(lead),
    };
    tracing::debug!(line = lexer.line, %found, "illegal character");
    ConfError::Lex {
        line: lexer.line,
        found,
    }
}

fn classify(lexeme: &[u8]) -> Token {
    let Some(&first) = lexeme.first() else {
        return Token::Eof;
    };
    if let Some(token) = Token::punctuation(first) {
        return token;
    }

    let text = String::from_utf8_lossy(lexeme).into_owned();
    if first.is_ascii_alphabetic() {
        Token::Ident(text)
    } else if lexeme.contains(&b'"') {
        Token::Str(text)
    } else if first.is_ascii_digit()
        || (first == b'-' && lexeme.get(1).is_some_and(u8::is_ascii_digit))
    {
        if lexeme.contains(&b'.') {
            Token::Double(text)
        } else {
            Token::Integer(text)
        }
    } else {
        Token::Unclassified(text)
    }
}
