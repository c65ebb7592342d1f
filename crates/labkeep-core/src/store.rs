use crate::id::IdGenerator;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A record that lives in an [`EntityStore`] under a generated identifier.
pub trait Entity {
    fn id(&self) -> &str;
}

/// Insertion-ordered map from generated ID to entity.
///
/// Entities are never removed, so positions in `items` stay stable and the
/// index can point straight at them.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    ids: IdGenerator,
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(prefix: char) -> Self {
        Self {
            ids: IdGenerator::new(prefix),
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Allocate an ID, build the entity with it, and store it.
    pub fn create(&mut self, build: impl FnOnce(String) -> T) -> String {
        let id = self.ids.next_id();
        let entity = build(id.clone());
        debug_assert_eq!(entity.id(), id);
        self.index.insert(id.clone(), self.items.len());
        self.items.push(entity);
        id
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&i| &mut self.items[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All entities in creation order.
    pub fn list_all(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Serializes as a plain list in creation order.
impl<T: Serialize> Serialize for EntityStore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
