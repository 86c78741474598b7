// Author: Dustin Pilgrim
// License: MIT

//! In-memory configuration tree.
//!
//! Every container exclusively owns its children. Reading "the next" member of
//! a container removes it, so a drained container is empty afterwards; use the
//! `find_*` lookups for non-destructive access.

mod conversion;
mod data;
mod entity;
mod key;

pub use conversion::FromData;
pub use data::{Data, DataKind};
pub use entity::{Configuration, Entity, Members};
pub use key::{Array, Key, KeyKind, List, Pairs, Shape};
