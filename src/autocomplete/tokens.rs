use std::collections::HashMap;

use super::catalog::EntryId;

/// Shortest word (in characters) that gets a token key.
pub const MIN_TOKEN_LEN: usize = 2;

/// Maps each word of each catalog name to the entries containing it.
/// Posting lists hold ascending ids without duplicates.
#[derive(Debug, Default)]
pub struct TokenIndex {
    keys: HashMap<String, Vec<EntryId>>,
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the words of `name`. Ids must be inserted in ascending order.
    pub fn insert(&mut self, name: &str, id: EntryId) {
        for word in name.split_whitespace() {
            if word.chars().count() < MIN_TOKEN_LEN {
                continue;
            }

            let ids = self.keys.entry(word.to_string()).or_default();
            // Repeated words in the same name.
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&[EntryId]> {
        self.keys.get(word).map(|ids| ids.as_slice())
    }

    /// Entries containing every word of `words` that has a key. Words with
    /// no key are ignored. Returns None if none of the words has a key.
    pub fn intersect<'a>(&self, words: impl IntoIterator<Item = &'a str>) -> Option<Vec<EntryId>> {
        let mut out: Option<Vec<EntryId>> = None;

        for ids in words.into_iter().filter_map(|w| self.get(w)) {
            out = Some(match out {
                None => ids.to_vec(),
                Some(acc) => intersect_sorted(&acc, ids),
            });
        }

        out
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Intersect two ascending id lists.
fn intersect_sorted(a: &[EntryId], b: &[EntryId]) -> Vec<EntryId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    out
}
