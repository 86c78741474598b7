// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use super::key::{Key, Shape};

/// Owned keys and child entities of one scope, each unique by id and kept in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Members {
    keys: IndexMap<String, Key>,
    entities: IndexMap<String, Entity>,
}

impl Members {
    /// Insert `key` unless a key with the same id is present. A rejected key
    /// is handed back to the caller.
    pub fn add_key(&mut self, key: Key) -> Option<Key> {
        if self.keys.contains_key(key.id()) {
            return Some(key);
        }
        self.keys.insert(key.id().to_string(), key);
        None
    }

    /// Insert `entity` unless an entity with the same id is present. A
    /// rejected entity is handed back to the caller.
    pub fn add_entity(&mut self, entity: Entity) -> Option<Entity> {
        if self.entities.contains_key(entity.id()) {
            return Some(entity);
        }
        self.entities.insert(entity.id().to_string(), entity);
        None
    }

    pub fn find_key(&self, id: &str) -> Option<&Key> {
        self.keys.get(id)
    }

    /// Bound value of the key `id`, open for editing. The key's id stays
    /// fixed; use [`Members::rename_key`] to change it.
    pub fn find_shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.keys.get_mut(id).map(Key::shape_mut)
    }

    pub fn find_entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Members of the child entity `id`, open for editing. The child's id
    /// stays fixed; use [`Members::rename_entity`] to change it.
    pub fn find_members_mut(&mut self, id: &str) -> Option<&mut Members> {
        self.entities.get_mut(id).map(Entity::members_mut)
    }

    /// Change the id of key `id` to `new_id`, keeping its position.
    ///
    /// Returns `false` and leaves the scope untouched when `id` is missing or
    /// another key already holds `new_id`.
    pub fn rename_key(&mut self, id: &str, new_id: impl Into<String>) -> bool {
        rekey(&mut self.keys, id, new_id.into(), |key, id| key.set_id(id))
    }

    /// Change the id of child entity `id` to `new_id`, keeping its position.
    ///
    /// Returns `false` and leaves the scope untouched when `id` is missing or
    /// another entity already holds `new_id`.
    pub fn rename_entity(&mut self, id: &str, new_id: impl Into<String>) -> bool {
        rekey(&mut self.entities, id, new_id.into(), |entity, id| entity.set_id(id))
    }

    /// Remove and return the oldest key.
    ///
    /// Remaining keys shift down one slot, so a full drain is quadratic in
    /// the number of keys.
    pub fn drain_next_key(&mut self) -> Option<Key> {
        self.keys.shift_remove_index(0).map(|(_, key)| key)
    }

    /// Remove and return the oldest child entity. Shifts like
    /// [`Members::drain_next_key`].
    pub fn drain_next_entity(&mut self) -> Option<Entity> {
        self.entities.shift_remove_index(0).map(|(_, entity)| entity)
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }

    pub fn len_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn len_entities(&self) -> usize {
        self.entities.len()
    }
}

/// Nested entities are released one level at a time so that dropping a deep
/// tree does not recurse.
impl Drop for Members {
    fn drop(&mut self) {
        let mut pending: Vec<Entity> = self.entities.drain(..).map(|(_, e)| e).collect();
        while let Some(mut entity) = pending.pop() {
            pending.extend(entity.members.entities.drain(..).map(|(_, e)| e));
        }
    }
}

fn rekey<T>(
    map: &mut IndexMap<String, T>,
    id: &str,
    new_id: String,
    set_id: impl FnOnce(&mut T, String),
) -> bool {
    if map.contains_key(&new_id) {
        return new_id == id;
    }
    let Some(index) = map.get_index_of(id) else {
        return false;
    };
    let Some((_, mut item)) = map.shift_remove_index(index) else {
        return false;
    };
    set_id(&mut item, new_id.clone());
    map.shift_insert(index, new_id, item);
    true
}

/// A named scope owning keys and nested entities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    id: String,
    members: Members,
}

impl Entity {
    pub fn new(id: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            members: Members::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rename a detached entity. Inside a scope, use
    /// [`Members::rename_entity`] instead.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn add_key(&mut self, key: Key) -> Option<Key> {
        self.members.add_key(key)
    }

    pub fn add_entity(&mut self, entity: Entity) -> Option<Entity> {
        self.members.add_entity(entity)
    }

    pub fn find_key(&self, id: &str) -> Option<&Key> {
        self.members.find_key(id)
    }

    pub fn find_entity(&self, id: &str) -> Option<&Entity> {
        self.members.find_entity(id)
    }

    pub fn rename_key(&mut self, id: &str, new_id: impl Into<String>) -> bool {
        self.members.rename_key(id, new_id)
    }

    pub fn rename_entity(&mut self, id: &str, new_id: impl Into<String>) -> bool {
        self.members.rename_entity(id, new_id)
    }

    pub fn drain_next_key(&mut self) -> Option<Key> {
        self.members.drain_next_key()
    }

    pub fn drain_next_entity(&mut self) -> Option<Entity> {
        self.members.drain_next_entity()
    }

    pub fn clear_keys(&mut self) {
        self.members.clear_keys();
    }

    pub fn clear_entities(&mut self) {
        self.members.clear_entities();
    }

    pub fn len_keys(&self) -> usize {
        self.members.len_keys()
    }

    pub fn len_entities(&self) -> usize {
        self.members.len_entities()
    }
}

/// The parse root: top-level keys and entities, without an id of its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    members: Members,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn add_key(&mut self, key: Key) -> Option<Key> {
        self.members.add_key(key)
    }

    pub fn add_entity(&mut self, entity: Entity) -> Option<Entity> {
        self.members.add_entity(entity)
    }

    pub fn find_key(&self, id: &str) -> Option<&Key> {
        self.members.find_key(id)
    }

    pub fn find_entity(&self, id: &str) -> Option<&Entity> {
        self.members.find_entity(id)
    }

    pub fn rename_key(&mut self, id: &str, new_id: impl Into<String>) -> bool {
        self.members.rename_key(id, new_id)
    }

    pub fn rename_entity(&mut self, id: &str, new_id: impl Into<String>) -> bool {
        self.members.rename_entity(id, new_id)
    }

    pub fn drain_next_key(&mut self) -> Option<Key> {
        self.members.drain_next_key()
    }

    pub fn drain_next_entity(&mut self) -> Option<Entity> {
        self.members.drain_next_entity()
    }

    pub fn clear_keys(&mut self) {
        self.members.clear_keys();
    }

    pub fn clear_entities(&mut self) {
        self.members.clear_entities();
    }

    pub fn len_keys(&self) -> usize {
        self.members.len_keys()
    }

    pub fn len_entities(&self) -> usize {
        self.members.len_entities()
    }
}
