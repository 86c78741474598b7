// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use super::conversion::FromData;
use crate::ConfError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataKind {
    Integer,
    Double,
    String,
    #[default]
    None,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataKind::Integer => "integer",
            DataKind::Double => "double",
            DataKind::String => "string",
            DataKind::None => "untyped",
        })
    }
}

/// A scalar: a type tag plus its text exactly as written in the source.
///
/// String data keeps its surrounding quotes and any backslash escapes; use
/// [`Data::get`] to read the unquoted content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Data {
    kind: DataKind,
    text: String,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: DataKind) -> Self {
        Data {
            kind,
            text: String::new(),
        }
    }

    pub fn from_text(text: impl Into<String>, kind: DataKind) -> Self {
        Data {
            kind,
            text: text.into(),
        }
    }

    pub fn set(&mut self, text: impl Into<String>, kind: DataKind) {
        self.text = text.into();
        self.kind = kind;
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Read the stored text as `T`.
    ///
    /// The text is reparsed on every call. Doubles converted to `String`
    /// come back with exactly the digits that were typed.
    pub fn get<T: FromData>(&self) -> Result<T, ConfError> {
        T::from_data(self)
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
