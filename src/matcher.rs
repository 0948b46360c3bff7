use std::collections::{HashMap, HashSet};

use crate::{autocomplete::normalize, models::Recipe};

/// Default number of recipes returned by a match.
pub const MAX_MATCHES: usize = 10;

/// Shortest normalized ingredient name considered when matching.
const MIN_NAME_LEN: usize = 2;

/// Ranks recipes by how many of a set of query ingredients they contain.
///
/// Holds an inverted index from normalized ingredient name to the ids of the
/// recipes using it, so a match never re-parses the corpus.
#[derive(Debug, Default)]
pub struct RecipeMatcher {
    postings: HashMap<String, Vec<usize>>,
}

impl RecipeMatcher {
    pub fn new(recipes: &[Recipe]) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();

        for r in recipes {
            let Some(ingredients) = &r.ingredients else {
                continue;
            };

            for name in normalized_set(ingredients) {
                postings.entry(name).or_default().push(r.id);
            }
        }

        Self { postings }
    }

    /// Score recipes by the number of distinct normalized query ingredients
    /// they contain. Returns up to `num` (recipe id, score) pairs with a
    /// non-zero score, best first, ties by ascending id.
    pub fn match_recipes<S: AsRef<str>>(&self, query: &[S], num: usize) -> Vec<(usize, usize)> {
        let mut scores: HashMap<usize, usize> = HashMap::new();

        for name in normalized_set(query) {
            if let Some(ids) = self.postings.get(&name) {
                for id in ids {
                    *scores.entry(*id).or_default() += 1;
                }
            }
        }

        let mut out: Vec<(usize, usize)> = scores.into_iter().collect();
        out.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        out.truncate(num);
        out
    }

    /// Number of distinct ingredient names across all recipes.
    pub fn len(&self) -> usize {
        self.postings.len()
    }
}

/// Distinct normalized names in a list of raw ingredient strings.
fn normalized_set<S: AsRef<str>>(raw: &[S]) -> HashSet<String> {
    raw.iter()
        .map(|s| normalize(s.as_ref()))
        .filter(|s| s.chars().count() >= MIN_NAME_LEN)
        .collect()
}
