mod catalog;
mod normalize;
mod prefix;
mod tokens;

pub use normalize::normalize;

use catalog::{Catalog, EntryId, IngredientEntry};
use prefix::PrefixIndex;
use tokens::TokenIndex;

use std::collections::HashMap;

use crate::importer::parse_ingredient_list;

/// Default minimum query length (in characters, after normalization).
pub const MIN_QUERY_LEN: usize = 2;

/// Names shorter than this after normalization are not indexed.
const MIN_NAME_LEN: usize = 2;

/// Mutable form of the ingredient index. Collects names and counts and
/// maintains the prefix and token indexes as new names are added.
/// Call `build()` to get the read-only `Autocomplete`.
pub struct IndexBuilder {
    min_query_len: usize,
    catalog: Catalog,
    prefixes: PrefixIndex,
    tokens: TokenIndex,
}

impl IndexBuilder {
    pub fn new(min_query_len: usize) -> Self {
        let min_query_len = min_query_len.max(1);
        Self {
            min_query_len,
            catalog: Catalog::new(),
            prefixes: PrefixIndex::new(min_query_len),
            tokens: TokenIndex::new(),
        }
    }

    /// Add `count` occurrences of an ingredient. Zero counts and names that
    /// normalize to less than two characters are ignored. Known names only
    /// accumulate the count.
    pub fn add_ingredient(&mut self, raw: &str, count: u64) {
        if count == 0 {
            return;
        }

        let name = normalize(raw);
        if name.chars().count() < MIN_NAME_LEN {
            return;
        }

        if self.catalog.accumulate(&name, count) {
            return;
        }

        let id = self.catalog.push(name, count);
        let name = &self.catalog.get(id).name;
        self.prefixes.insert(name, id);
        self.tokens.insert(name, id);
    }

    /// Add ingredients from raw ingredient-list strings (one per recipe).
    /// Rows that fail to parse are logged and skipped.
    pub fn build_from_corpus<'a>(&mut self, rows: impl IntoIterator<Item = &'a str>) {
        let mut skipped = 0;
        let lists = rows
            .into_iter()
            .enumerate()
            .filter_map(|(n, row)| match parse_ingredient_list(row) {
                Ok(list) => Some(list),
                Err(e) => {
                    log::warn!("corpus row {}: skipping: {}", n + 1, e);
                    skipped += 1;
                    None
                }
            });

        self.build_from_lists(lists);

        if skipped > 0 {
            log::warn!("skipped {} malformed corpus rows", skipped);
        }
    }

    /// Count normalized names across all lists first, then add each distinct
    /// name once (in first-seen order) with its total count.
    pub fn build_from_lists<L, S>(&mut self, lists: impl IntoIterator<Item = L>)
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();

        for list in lists {
            for raw in list {
                let name = normalize(raw.as_ref());
                if name.chars().count() < MIN_NAME_LEN {
                    continue;
                }

                match counts.get_mut(&name) {
                    Some(c) => *c += 1,
                    None => {
                        counts.insert(name.clone(), 1);
                        order.push(name);
                    }
                }
            }
        }

        for name in order {
            let count = counts[&name];
            self.add_ingredient(&name, count);
        }
    }

    /// Freeze the index. Posting lists are ordered by the final counts here.
    pub fn build(mut self) -> Autocomplete {
        self.prefixes.finalize(&self.catalog);

        let mut popular: Vec<EntryId> = (0..self.catalog.len() as EntryId).collect();
        popular.sort_by(|a, b| self.catalog.get(*b).count.cmp(&self.catalog.get(*a).count));

        log::info!(
            "built ingredient index: {} names, {} prefixes, {} tokens",
            self.catalog.len(),
            self.prefixes.len(),
            self.tokens.len()
        );

        Autocomplete {
            min_query_len: self.min_query_len,
            catalog: self.catalog,
            prefixes: self.prefixes,
            tokens: self.tokens,
            popular,
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(MIN_QUERY_LEN)
    }
}

/// Read-only in-memory ingredient index for prefix and multi-word
/// autocomplete ranked by popularity.
pub struct Autocomplete {
    min_query_len: usize,
    catalog: Catalog,
    prefixes: PrefixIndex,
    tokens: TokenIndex,

    // Catalog ids by count desc (stable over first-seen order).
    popular: Vec<EntryId>,
}

impl Autocomplete {
    /// An index with no entries. Every query returns nothing.
    pub fn empty() -> Self {
        IndexBuilder::default().build()
    }

    /// Query autocomplete results (normalizes the query internally).
    /// Returns up to `num` names, most popular first.
    pub fn query(&self, q: &str, num: usize) -> Vec<String> {
        let q = normalize(q);
        if q.chars().count() < self.min_query_len || num == 0 {
            return Vec::new();
        }

        // Exact prefix hit. The list is already in popularity order.
        if let Some(ids) = self.prefixes.get(&q) {
            return ids.iter().take(num).map(|id| self.name(*id)).collect();
        }

        // Every known word of the query must appear in the name.
        let mut ids = match self.tokens.intersect(q.split_whitespace()) {
            Some(ids) => ids,
            None => return Vec::new(),
        };

        self.top(&mut ids, num)
            .iter()
            .map(|id| self.name(*id))
            .collect()
    }

    /// Most frequent ingredient names across the whole catalog.
    pub fn popular(&self, num: usize) -> Vec<String> {
        self.popular
            .iter()
            .take(num)
            .map(|id| self.name(*id))
            .collect()
    }

    /// Look up an entry by raw name (normalized internally).
    pub fn get(&self, name: &str) -> Option<&IngredientEntry> {
        self.catalog.find(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    fn name(&self, id: EntryId) -> String {
        self.catalog.get(id).name.clone()
    }

    /// Select the `num` most popular ids without sorting the whole list.
    fn top<'a>(&self, ids: &'a mut [EntryId], num: usize) -> &'a [EntryId] {
        if ids.len() > num {
            ids.select_nth_unstable_by(num - 1, |a, b| self.catalog.rank(*a, *b));
        }

        let n = num.min(ids.len());
        let ids = &mut ids[..n];
        ids.sort_unstable_by(|a, b| self.catalog.rank(*a, *b));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(items: &[(&str, u64)]) -> Autocomplete {
        let mut b = IndexBuilder::default();
        for (name, count) in items {
            b.add_ingredient(name, *count);
        }
        b.build()
    }

    #[test]
    fn test_count_accumulation() {
        let idx = index(&[("onion", 3), ("onion, diced", 2), ("2 tbsp Onion", 1)]);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("onion").map(|e| e.count), Some(6));
    }

    #[test]
    fn test_short_names_ignored() {
        let idx = index(&[("a", 10), ("2 cups", 4), ("!!", 1), ("ox", 1)]);
        assert_eq!(idx.len(), 1);
        assert!(idx.get("ox").is_some());
    }

    #[test]
    fn test_zero_counts_ignored() {
        let idx = index(&[("salt", 0), ("pepper", 2), ("pepper", 0)]);
        assert_eq!(idx.len(), 1);
        assert!(idx.get("salt").is_none());
        assert_eq!(idx.get("pepper").map(|e| e.count), Some(2));
        assert!(idx.query("sa", 10).is_empty());
    }

    #[test]
    fn test_ranking() {
        let idx = index(&[("flax", 5), ("flour", 100)]);
        assert_eq!(idx.query("fl", 10), vec!["flour", "flax"]);
        assert_eq!(idx.query("FL", 1), vec!["flour"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let idx = index(&[("basil", 2), ("bay leaf", 2), ("bacon", 2), ("banana", 9)]);
        assert_eq!(idx.query("ba", 10), vec!["banana", "bacon", "basil", "bay leaf"]);
    }

    #[test]
    fn test_ranking_uses_final_counts() {
        // "rice" is indexed first with a lower count than "ricotta", then
        // overtakes it through accumulation.
        let idx = index(&[("rice", 1), ("ricotta", 5), ("Rice, cooked", 10)]);
        assert_eq!(idx.query("ric", 10), vec!["rice", "ricotta"]);
    }

    #[test]
    fn test_prefix_completeness() {
        let names = ["garlic", "garlic powder", "ham", "ox", "crème fraîche"];
        let items: Vec<(&str, u64)> = names.iter().map(|n| (*n, 1)).collect();
        let idx = index(&items);

        for name in names {
            let chars: Vec<char> = name.chars().collect();
            for i in 2.min(chars.len())..=chars.len() {
                let prefix: String = chars[..i].iter().collect();
                if prefix.trim().len() < prefix.len() {
                    // Trailing space is trimmed by normalization.
                    continue;
                }
                assert!(
                    idx.query(&prefix, 10).contains(&name.to_string()),
                    "{prefix:?} should find {name:?}"
                );
            }
        }
    }

    #[test]
    fn test_token_conjunction() {
        let idx = index(&[
            ("olive oil", 10),
            ("extra virgin olive oil", 7),
            ("olives", 20),
            ("vegetable oil", 30),
            ("blend of oil and olive", 1),
        ]);

        // "oil olive" is not a prefix, so it resolves through the tokens.
        assert_eq!(
            idx.query("oil olive", 10),
            vec!["olive oil", "extra virgin olive oil", "blend of oil and olive"]
        );
        assert_eq!(idx.query("virgin oil", 10), vec!["extra virgin olive oil"]);
        assert_eq!(idx.query("oil", 2), vec!["vegetable oil", "olive oil"]);
    }

    #[test]
    fn test_token_query_ignores_unknown_words() {
        let idx = index(&[("vegetable oil", 30), ("olive oil", 10)]);
        assert_eq!(idx.query("zzz oil", 10), vec!["vegetable oil", "olive oil"]);
        assert!(idx.query("zzz yyy", 10).is_empty());
    }

    #[test]
    fn test_token_query_limit() {
        let items: Vec<(String, u64)> = (1..=50).map(|i| (format!("sauce no{}", i), i)).collect();
        let mut b = IndexBuilder::default();
        for (name, count) in &items {
            b.add_ingredient(name, *count);
        }
        let idx = b.build();

        let out = idx.query("hot sauce", 3);
        assert_eq!(out, vec!["sauce no50", "sauce no49", "sauce no48"]);
    }

    #[test]
    fn test_min_query_len() {
        let idx = index(&[("apple", 1), ("ab", 1)]);
        assert!(idx.query("a", 10).is_empty());
        assert!(idx.query("", 10).is_empty());
        assert!(idx.query("  !! ", 10).is_empty());
        assert_eq!(idx.query("ap", 10), vec!["apple"]);
        assert_eq!(idx.query("apple", 0), Vec::<String>::new());

        let mut b = IndexBuilder::new(4);
        b.add_ingredient("apple", 1);
        let idx = b.build();
        assert!(idx.query("app", 10).is_empty());
        assert_eq!(idx.query("appl", 10), vec!["apple"]);
    }

    #[test]
    fn test_no_duplicates() {
        let idx = index(&[("salt", 1), ("salt and salt", 1), ("sea salt", 1)]);
        let out = idx.query("salt salt", 10);
        let unique: std::collections::HashSet<&String> = out.iter().collect();
        assert_eq!(out.len(), 3);
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_popular() {
        let idx = index(&[("salt", 40), ("sugar", 90), ("eggs", 40), ("butter", 70)]);
        assert_eq!(idx.popular(3), vec!["sugar", "butter", "salt"]);
        assert_eq!(idx.popular(50).len(), 4);
    }

    #[test]
    fn test_build_from_corpus() {
        let mut b = IndexBuilder::default();
        b.build_from_corpus(["onion, garlic", "garlic, basil"]);
        let idx = b.build();

        assert_eq!(idx.len(), 3);
        assert_eq!(idx.get("onion").map(|e| e.count), Some(1));
        assert_eq!(idx.get("garlic").map(|e| e.count), Some(2));
        assert_eq!(idx.get("basil").map(|e| e.count), Some(1));
        assert_eq!(idx.query("gar", 10), vec!["garlic"]);
        assert_eq!(idx.popular(2)[0], "garlic");
    }

    #[test]
    fn test_build_skips_malformed_rows() {
        let rows = [
            r#"c("Butter", "2 cups Flour")"#,
            r#"c("sugar", "#,
            r#"["butter", "eggs"]"#,
            r#"["broken"#,
        ];
        let mut b = IndexBuilder::default();
        b.build_from_corpus(rows);
        let idx = b.build();

        assert_eq!(idx.len(), 3);
        assert_eq!(idx.get("butter").map(|e| e.count), Some(2));
        assert_eq!(idx.get("flour").map(|e| e.count), Some(1));
        assert_eq!(idx.get("eggs").map(|e| e.count), Some(1));
        assert!(idx.get("sugar").is_none());
    }

    #[test]
    fn test_empty() {
        let idx = Autocomplete::empty();
        assert!(idx.is_empty());
        assert!(idx.query("onion", 10).is_empty());
        assert!(idx.popular(50).is_empty());
    }
}
