// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::io::{BufReader, Bytes, Read};

use crate::ConfError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals (lexeme kept as typed) ---
    Ident(String),
    Integer(String),
    Double(String),
    Str(String),

    // --- punctuation ---
    Assign,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LAngle,
    RAngle,
    Semicolon,
    Colon,
    Comma,

    /// A lexeme the state machine accepted but no token class claims,
    /// e.g. a lone `_`, `\`, `+5` or `.5`.
    Unclassified(String),
    Eof,
}

impl Token {
    pub(crate) fn punctuation(byte: u8) -> Option<Token> {
        let token = match byte {
            b'=' => Token::Assign,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            b'<' => Token::LAngle,
            b'>' => Token::RAngle,
            b';' => Token::Semicolon,
            b':' => Token::Colon,
            b',' => Token::Comma,
            _ => return None,
        };
        Some(token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Ident(s)
            | Token::Integer(s)
            | Token::Double(s)
            | Token::Str(s)
            | Token::Unclassified(s) => s.as_str(),
            Token::Assign => "=",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LAngle => "<",
            Token::RAngle => ">",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Comma => ",",
            Token::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// Byte-oriented tokenizer over any reader.
///
/// The lexer owns its source for the whole parse and reads it one byte at a
/// time; at most one byte of lookahead is ever pushed back.
pub struct Lexer<R: Read> {
    input: Bytes<BufReader<R>>,
    pending: Option<u8>,
    line: usize,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer {
            input: BufReader::new(reader).bytes(),
            pending: None,
            line: 1,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_token(&mut self) -> Result<Token, ConfError> {
        tokenizer::next_token(self)
    }
}
