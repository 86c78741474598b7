// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::io;

use thiserror::Error;

use crate::tree::DataKind;

/// What the lexer tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexFault {
    /// A character outside the language alphabet.
    Char(char),
    /// A byte that does not start a valid UTF-8 character.
    Byte(u8),
    /// A newline inside a string or comment context that may not end there.
    EndOfLine,
    /// End of input inside a string or comment context.
    EndOfFile,
}

impl fmt::Display for LexFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexFault::Char(c) => write!(f, "'{}'", c),
            LexFault::Byte(b) => write!(f, "'\\x{:02X}'", b),
            LexFault::EndOfLine => f.write_str("end of line"),
            LexFault::EndOfFile => f.write_str("end of file"),
        }
    }
}

/// The main error type for lexing, parsing and reading configurations.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("Error at line {line}: {}", lex_message(.found))]
    Lex { line: usize, found: LexFault },

    #[error("Error at line {line}: {found} is not allowed here. {expected} was expected.")]
    Syntax {
        line: usize,
        found: String,
        expected: String,
    },

    /// The file could not be opened; raised before any tokenizing.
    #[error("File \"{path}\" could not be opened: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The underlying reader failed mid-stream.
    #[error("Read failure at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read {kind} data {text:?} as {target}")]
    Type {
        text: String,
        kind: DataKind,
        target: &'static str,
    },

    #[error("Path '{path}' not found in configuration")]
    NotFound { path: String },
}

fn lex_message(found: &LexFault) -> String {
    match found {
        LexFault::Char(_) | LexFault::Byte(_) => format!("{}: Not allowed character.", found),
        _ => format!("{} is not allowed here.", found),
    }
}

impl ConfError {
    /// Line the error was detected on, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfError::Lex { line, .. }
            | ConfError::Syntax { line, .. }
            | ConfError::Read { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn syntax(line: usize, found: impl fmt::Display, expected: &str) -> Self {
        ConfError::Syntax {
            line,
            found: found.to_string(),
            expected: expected.to_string(),
        }
    }
}
