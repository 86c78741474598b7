// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;

use super::*;

/// Input classes, in the column order of [`TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CharClass {
    White,
    Letter,
    Digit,
    Eol,
    Eof,
    Slash,
    Quote,
    Backslash,
    Minus,
    Underscore,
    Period,
    Plus,
    Other,
}

const CLASS_COUNT: usize = 13;

/// Lexer states, in the row order of [`TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum State {
    Start,
    Ident,
    Number,
    Slash,
    Comment,
    Quoted,
    Escape,
    Fraction,
    Sign,
}

const STATE_COUNT: usize = 9;

impl State {
    /// States whose bytes are taken literally: any byte is allowed and
    /// whitespace is part of the lexeme.
    pub(super) fn is_literal(self) -> bool {
        matches!(self, State::Quoted | State::Escape | State::Comment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    To(State),
    /// Lexeme complete, current byte included.
    Accept,
    /// Lexeme complete, current byte belongs to the next token.
    Backtrack,
    /// End of line or file where the lexeme may not end.
    Fail,
}

const S0: Step = Step::To(State::Start);
const S1: Step = Step::To(State::Ident);
const S2: Step = Step::To(State::Number);
const S3: Step = Step::To(State::Slash);
const S4: Step = Step::To(State::Comment);
const S5: Step = Step::To(State::Quoted);
const S6: Step = Step::To(State::Escape);
const S7: Step = Step::To(State::Fraction);
const S8: Step = Step::To(State::Sign);
const OK: Step = Step::Accept;
const BK: Step = Step::Backtrack;
const ER: Step = Step::Fail;

#[rustfmt::skip]
const TABLE: [[Step; CLASS_COUNT]; STATE_COUNT] = [
    // ws  lt  dg  eol eof  /   "   \   -   _   .   +   o
    [S0, S1, S2, S0, OK, S3, S5, OK, S8, OK, S7, S8, OK], // start
    [BK, S1, S1, BK, BK, BK, BK, BK, S1, S1, S1, S1, BK], // identifier
    [BK, BK, S2, BK, BK, BK, BK, BK, BK, BK, S7, BK, BK], // number
    [BK, BK, BK, BK, BK, S4, BK, BK, BK, BK, BK, BK, BK], // slash
    [S4, S4, S4, S0, ER, S4, S4, S4, S4, S4, S4, S4, S4], // comment
    [S5, S5, S5, ER, ER, S5, OK, S6, S5, S5, S5, S5, S5], // quoted
    [S5, S5, S5, ER, ER, S5, S5, S6, S5, S5, S5, S5, S5], // escape
    [BK, BK, S7, BK, BK, BK, BK, BK, BK, BK, BK, BK, BK], // fraction
    [BK, BK, S2, BK, BK, BK, BK, BK, BK, BK, BK, BK, BK], // sign
];

pub(super) fn step(state: State, class: CharClass) -> Step {
    TABLE[state as usize][class as usize]
}

/// Single-character punctuation symbols, all of class `Other`.
pub(super) const PUNCTUATION: [u8; 12] = *b"=[](){}<>;:,";

static CLASSES: Lazy<[Option<CharClass>; 256]> = Lazy::new(|| {
    let mut table = [None; 256];
    for byte in 0..=u8::MAX {
        table[byte as usize] = classify_byte(byte);
    }
    table
});

fn classify_byte(byte: u8) -> Option<CharClass> {
    let class = match byte {
        b'\n' => CharClass::Eol,
        b' ' | b'\t' | b'\r' | 0x0b | 0x0c => CharClass::White,
        b'/' => CharClass::Slash,
        b'"' => CharClass::Quote,
        b'\\' => CharClass::Backslash,
        b'-' => CharClass::Minus,
        b'_' => CharClass::Underscore,
        b'.' => CharClass::Period,
        b'+' => CharClass::Plus,
        b if b.is_ascii_alphabetic() => CharClass::Letter,
        b if b.is_ascii_digit() => CharClass::Digit,
        b if PUNCTUATION.contains(&b) => CharClass::Other,
        _ => return None,
    };
    Some(class)
}

/// Class of an input byte, `None` when the byte is outside the alphabet.
pub(super) fn class_of(byte: u8) -> Option<CharClass> {
    CLASSES[byte as usize]
}

/// Length of the UTF-8 sequence a lead byte opens. Bytes that cannot lead
/// a sequence count as one.
pub(super) fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

/// Read one byte, counting newlines.
pub(super) fn bump<R: Read>(lexer: &mut Lexer<R>) -> Result<Option<u8>, ConfError> {
    let byte = match lexer.pending.take() {
        Some(b) => Some(b),
        None => match lexer.input.next() {
            None => None,
            Some(Ok(b)) => Some(b),
            Some(Err(source)) => {
                return Err(ConfError::Read {
                    line: lexer.line,
                    source,
                });
            }
        },
    };
    if byte == Some(b'\n') {
        lexer.line += 1;
    }
    Ok(byte)
}

/// Push one byte of lookahead back. A pushed-back newline is un-counted so
/// it is only counted once, when finally consumed.
pub(super) fn unbump<R: Read>(lexer: &mut Lexer<R>, byte: Option<u8>) {
    if let Some(b) = byte {
        if b == b'\n' {
            lexer.line -= 1;
        }
        lexer.pending = Some(b);
    }
}
