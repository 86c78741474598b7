// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::tree::{Entity, FromData, Key, Members};

/// Separates segments in lookup paths. Identifiers may contain `.`, so the
/// dot cannot serve here.
pub const PATH_SEPARATOR: char = '/';

impl ConfSlice {
    /// Get a typed value from a value key, addressed by a `/`-separated path
    /// of entity ids ending in the key id.
    ///
    /// Automatically handles both `snake_case` and `kebab-case` ids.
    ///
    /// # Examples
    /// ```
    /// # use confslice::ConfSlice;
    /// let conf = ConfSlice::from_str("server: { host = \"localhost\"; port = 8080; };")?;
    /// let host: String = conf.get("server/host")?;
    /// let port: u16 = conf.get("server/port")?;
    /// assert_eq!(host, "localhost");
    /// assert_eq!(port, 8080);
    /// # Ok::<(), confslice::ConfError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`ConfError::NotFound`] if the path does not lead to a value
    /// key, or [`ConfError::Type`] if the value can't be read as `T`.
    pub fn get<T: FromData>(&self, path: &str) -> Result<T, ConfError> {
        let key = self.key(path).ok_or_else(|| not_found(path))?;
        let data = key.as_value().ok_or_else(|| not_found(path))?;
        data.get()
    }

    /// Like [`ConfSlice::get`], but a missing path yields `Ok(None)`.
    pub fn get_optional<T: FromData>(&self, path: &str) -> Result<Option<T>, ConfError> {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(ConfError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```
    /// # use confslice::ConfSlice;
    /// # let conf = ConfSlice::from_str("").unwrap();
    /// let timeout = conf.get_or("server/timeout", 30u64);
    /// assert_eq!(timeout, 30);
    /// ```
    pub fn get_or<T: FromData>(&self, path: &str, default: T) -> T {
        self.get(path).unwrap_or(default)
    }

    /// Check whether a path names a key or an entity.
    pub fn has(&self, path: &str) -> bool {
        self.key(path).is_some() || self.entity(path).is_some()
    }

    /// Key at `path`, any shape.
    pub fn key(&self, path: &str) -> Option<&Key> {
        let (scope, last) = self.walk(path)?;
        find_flexible(last, move |id| scope.find_key(id))
    }

    /// Entity at `path`.
    pub fn entity(&self, path: &str) -> Option<&Entity> {
        let (scope, last) = self.walk(path)?;
        find_flexible(last, move |id| scope.find_entity(id))
    }

    /// Follow every segment but the last through nested entities.
    fn walk<'a, 'p>(&'a self, path: &'p str) -> Option<(&'a Members, &'p str)> {
        let path = path.trim_matches(PATH_SEPARATOR);
        if path.is_empty() {
            return None;
        }

        let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let last = segments.pop()?;

        let mut scope = self.configuration.members();
        for segment in segments {
            let current = scope;
            scope = find_flexible(segment, move |id| current.find_entity(id))?.members();
        }
        Some((scope, last))
    }
}

/// Try the id as given, then its snake_case and kebab-case spellings.
fn find_flexible<'a, T>(id: &str, find: impl Fn(&str) -> Option<&'a T>) -> Option<&'a T>
where
    T: 'a,
{
    if let Some(found) = find(id) {
        return Some(found);
    }

    let snake = id.replace('-', "_");
    if snake != id {
        if let Some(found) = find(&snake) {
            return Some(found);
        }
    }

    let kebab = id.replace('_', "-");
    if kebab != id {
        return find(&kebab);
    }
    None
}

fn not_found(path: &str) -> ConfError {
    ConfError::NotFound {
        path: path.to_string(),
    }
}
