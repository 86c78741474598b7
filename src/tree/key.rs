// Author: Dustin Pilgrim
// License: MIT

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use super::data::Data;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Value,
    Array,
    List,
    Pairs,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyKind::Value => "value",
            KeyKind::Array => "array",
            KeyKind::List => "list",
            KeyKind::Pairs => "pairs",
        })
    }
}

/// What a key is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Value(Data),
    Array(Array),
    List(List),
    Pairs(Pairs),
}

/// A named binding, unique by id among its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    id: String,
    shape: Shape,
}

impl Key {
    pub fn new(id: impl Into<String>, shape: Shape) -> Self {
        Key {
            id: id.into(),
            shape,
        }
    }

    pub fn value(id: impl Into<String>, data: Data) -> Self {
        Self::new(id, Shape::Value(data))
    }

    pub fn array(id: impl Into<String>, array: Array) -> Self {
        Self::new(id, Shape::Array(array))
    }

    pub fn list(id: impl Into<String>, list: List) -> Self {
        Self::new(id, Shape::List(list))
    }

    pub fn pairs(id: impl Into<String>, pairs: Pairs) -> Self {
        Self::new(id, Shape::Pairs(pairs))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rename a detached key. Inside a scope, use
    /// [`Members::rename_key`](super::Members::rename_key) instead.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn kind(&self) -> KeyKind {
        match self.shape {
            Shape::Value(_) => KeyKind::Value,
            Shape::Array(_) => KeyKind::Array,
            Shape::List(_) => KeyKind::List,
            Shape::Pairs(_) => KeyKind::Pairs,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }

    pub fn as_value(&self) -> Option<&Data> {
        match &self.shape {
            Shape::Value(data) => Some(data),
            _ => None,
        }
    }

    /// Replace the single value of a value key. Returns `false` for other shapes.
    pub fn set_value(&mut self, data: Data) -> bool {
        match &mut self.shape {
            Shape::Value(slot) => {
                *slot = data;
                true
            }
            _ => false,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match &self.shape {
            Shape::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match &mut self.shape {
            Shape::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match &self.shape {
            Shape::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&Pairs> {
        match &self.shape {
            Shape::Pairs(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match &mut self.shape {
            Shape::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_pairs_mut(&mut self) -> Option<&mut Pairs> {
        match &mut self.shape {
            Shape::Pairs(pairs) => Some(pairs),
            _ => None,
        }
    }
}

/// Sparse mapping from index to scalar. Its size counts entries, not the
/// highest index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    entries: BTreeMap<usize, Data>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, data: Data) {
        self.entries.insert(index, data);
    }

    pub fn get(&self, index: usize) -> Option<&Data> {
        self.entries.get(&index)
    }

    /// Slot at `index`, created as untyped data on first access.
    pub fn entry(&mut self, index: usize) -> &mut Data {
        self.entries.entry(index).or_default()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A recursive list.
///
/// Scalars and nested lists are kept in two separate sequences, each in
/// insertion order; the relative order between a scalar and a sublist is not
/// recorded. Reading is destructive: every `drain_next_*` call removes the
/// element it returns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    data: VecDeque<Data>,
    lists: VecDeque<List>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_data(&mut self, data: Data) {
        self.data.push_back(data);
    }

    pub fn insert_list(&mut self, list: List) {
        self.lists.push_back(list);
    }

    pub fn len_data(&self) -> usize {
        self.data.len()
    }

    pub fn len_lists(&self) -> usize {
        self.lists.len()
    }

    pub fn drain_next_data(&mut self) -> Option<Data> {
        self.data.pop_front()
    }

    pub fn drain_next_list(&mut self) -> Option<List> {
        self.lists.pop_front()
    }

    pub fn clear_data(&mut self) {
        self.data.clear();
    }

    pub fn clear_lists(&mut self) {
        self.lists.clear();
    }
}

/// Sublists are released one level at a time so that dropping a deeply
/// nested list does not recurse.
impl Drop for List {
    fn drop(&mut self) {
        let mut pending: Vec<List> = self.lists.drain(..).collect();
        while let Some(mut list) = pending.pop() {
            pending.extend(list.lists.drain(..));
        }
    }
}

/// Ordered `(id, value)` entries. Ids are not required to be unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pairs {
    entries: VecDeque<(String, Data)>,
}

impl Pairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: Data) {
        self.entries.push_back((id.into(), value));
    }

    pub fn drain_next(&mut self) -> Option<(String, Data)> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
