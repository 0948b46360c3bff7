use std::collections::HashMap;

use super::catalog::{Catalog, EntryId};

/// Shortest prefix indexed for names at least this long.
pub const MAX_START_LEN: usize = 3;

/// Maps every prefix of every catalog name to the entries sharing it.
///
/// Posting lists are unordered while the index is being built. `finalize()`
/// sorts each list once by popularity using the final catalog counts, so
/// lookups can take the first `n` ids as-is.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    start_len: usize,
    keys: HashMap<String, Vec<EntryId>>,
}

impl PrefixIndex {
    /// `start_len` is the shortest prefix (in characters) that gets a key.
    /// Names shorter than that are indexed under their full string only.
    pub fn new(start_len: usize) -> Self {
        Self {
            start_len: start_len.clamp(1, MAX_START_LEN),
            keys: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, id: EntryId) {
        let n_chars = name.chars().count();
        let start = self.start_len.min(n_chars);

        // Byte offsets that end each character prefix.
        let ends = name
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(name.len()));

        for (n, end) in ends.enumerate() {
            if n + 1 < start {
                continue;
            }
            self.keys.entry(name[..end].to_string()).or_default().push(id);
        }
    }

    /// Sort every posting list by popularity (count desc, name asc).
    pub fn finalize(&mut self, catalog: &Catalog) {
        for ids in self.keys.values_mut() {
            ids.sort_unstable_by(|a, b| catalog.rank(*a, *b));
        }
    }

    /// Entries under `prefix` in popularity order, if it is a key.
    pub fn get(&self, prefix: &str) -> Option<&[EntryId]> {
        self.keys.get(prefix).map(|ids| ids.as_slice())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}
