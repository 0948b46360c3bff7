use std::collections::HashMap;

use serde::Serialize;

/// A distinct normalized ingredient name with its aggregated occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientEntry {
    pub name: String,
    pub count: u64,
}

/// Entry ids are positions in the catalog (first-seen order).
pub type EntryId = u32;

/// Append-only collection of ingredient entries with a name lookup.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<IngredientEntry>,
    lookup: HashMap<String, EntryId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to an existing entry. Returns false if the name is unknown.
    pub fn accumulate(&mut self, name: &str, count: u64) -> bool {
        match self.lookup.get(name) {
            Some(&id) => {
                let entry = &mut self.entries[id as usize];
                entry.count = entry.count.saturating_add(count);
                true
            }
            None => false,
        }
    }

    /// Append a new entry. The name must not be in the catalog yet.
    pub fn push(&mut self, name: String, count: u64) -> EntryId {
        debug_assert!(!self.lookup.contains_key(&name));

        let id = self.entries.len() as EntryId;
        self.lookup.insert(name.clone(), id);
        self.entries.push(IngredientEntry { name, count });
        id
    }

    pub fn get(&self, id: EntryId) -> &IngredientEntry {
        &self.entries[id as usize]
    }

    pub fn find(&self, name: &str) -> Option<&IngredientEntry> {
        self.lookup.get(name).map(|&id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Popularity order: count desc, then name asc.
    pub fn rank(&self, a: EntryId, b: EntryId) -> std::cmp::Ordering {
        let (ea, eb) = (self.get(a), self.get(b));
        eb.count.cmp(&ea.count).then_with(|| ea.name.cmp(&eb.name))
    }
}
