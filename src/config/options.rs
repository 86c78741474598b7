// Author: Dustin Pilgrim
// License: MIT

/// Knobs for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Store the entries of `{ id = value; ... }` pair blocks.
    ///
    /// Turning this off keeps the legacy behavior where entries are checked
    /// for syntax and then thrown away, leaving every pairs key empty.
    pub retain_pairs: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { retain_pairs: true }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retain_pairs(mut self, retain: bool) -> Self {
        self.retain_pairs = retain;
        self
    }

    /// Options matching the legacy parser, which dropped pair values.
    pub fn legacy() -> Self {
        Self::default().with_retain_pairs(false)
    }
}
