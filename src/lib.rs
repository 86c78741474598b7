// Author: Dustin Pilgrim
// License: MIT

//! Parser for a small declarative configuration language.
//!
//! A configuration is a sequence of keys (`id = value;`) and entities
//! (`id: { ... };`). Key values are scalars, arrays `[1, 2]`, nested lists
//! `<1, <2, 3>>` or pair blocks `{ a = 1; b = 2 }`.
//!
//! ```
//! let mut conf = confslice::parse_str("app: { debug = 1; };")?;
//! let app = conf.drain_next_entity().unwrap();
//! assert_eq!(app.id(), "app");
//! assert_eq!(app.find_key("debug").unwrap().as_value().unwrap().get::<i64>()?, 1);
//! # Ok::<(), confslice::ConfError>(())
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use config::{load_and_parse, parse_str, ConfSlice, ParseOptions};
pub use error::{ConfError, LexFault};
pub use tree::{Array, Configuration, Data, DataKind, Entity, FromData, Key, KeyKind, List, Pairs, Shape};
