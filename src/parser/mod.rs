// Author: Dustin Pilgrim
// License: MIT

use std::io::Read;

use crate::config::ParseOptions;
use crate::lexer::{Lexer, Token};
use crate::tree::{Configuration, Data, DataKind, Entity, Key};
use crate::ConfError;

mod document;
mod value;

/// Recursive-descent parser. Pulls one token at a time from its lexer and
/// builds a [`Configuration`].
///
/// The first error ends the parse; nodes built so far are dropped on the way
/// out.
pub struct Parser<R: Read> {
    lexer: Lexer<R>,
    options: ParseOptions,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(reader),
            options,
        }
    }

    pub(crate) fn bump(&mut self) -> Result<Token, ConfError> {
        self.lexer.next_token()
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    /// Build a syntax error for `found` and log it.
    pub(crate) fn unexpected(&self, found: &Token, expected: &str) -> ConfError {
        let err = ConfError::syntax(self.line(), found, expected);
        tracing::debug!(line = self.line(), %found, expected, "syntax error");
        err
    }

    /// Consume the next token and fail unless it is `expected`.
    pub(crate) fn expect(&mut self, expected: Token, description: &str) -> Result<(), ConfError> {
        let token = self.bump()?;
        if token != expected {
            return Err(self.unexpected(&token, description));
        }
        Ok(())
    }

    /// Parse the whole input. Consumes the parser; the source is released
    /// whether or not parsing succeeds.
    pub fn parse(mut self) -> Result<Configuration, ConfError> {
        document::parse_configuration(&mut self)
    }
}

/// Result of a `key_or_entity` rule: a finished key, or an entity whose body
/// is still to be read.
pub(crate) enum Member {
    Key(Key),
    Entity(Entity),
}

/// Scalar for a value token, `None` for any other token.
pub(crate) fn token_data(token: &Token) -> Option<Data> {
    match token {
        Token::Integer(text) => Some(Data::from_text(text.as_str(), DataKind::Integer)),
        Token::Double(text) => Some(Data::from_text(text.as_str(), DataKind::Double)),
        Token::Str(text) => Some(Data::from_text(text.as_str(), DataKind::String)),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
