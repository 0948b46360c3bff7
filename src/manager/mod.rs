use std::{path::PathBuf, sync::Arc};

use arc_swap::ArcSwap;

use crate::{
    autocomplete::{Autocomplete, IndexBuilder},
    importer::{self, Corpus, ImportError},
    matcher::RecipeMatcher,
    models::{Recipe, RecipeDetail, RecipeSummary, Stats},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("recipe not found")]
    NotFound,
    #[error("import error: {0}")]
    Import(#[from] ImportError),
}

/// Recipes with the ingredient index and matcher built from them.
/// Immutable once built.
pub struct Library {
    pub recipes: Vec<Recipe>,
    pub autocomplete: Autocomplete,
    pub matcher: RecipeMatcher,
    pub skipped: usize,
}

impl Library {
    /// Build the library from an imported corpus. Recipes whose ingredient
    /// list failed to parse contribute nothing to the index.
    pub fn new(corpus: Corpus, min_query_len: usize) -> Self {
        let mut b = IndexBuilder::new(min_query_len);
        b.build_from_lists(
            corpus
                .recipes
                .iter()
                .filter_map(|r| r.ingredients.as_deref()),
        );

        let matcher = RecipeMatcher::new(&corpus.recipes);
        log::debug!("recipe matcher: {} ingredient names", matcher.len());

        Self {
            autocomplete: b.build(),
            matcher,
            recipes: corpus.recipes,
            skipped: corpus.skipped + corpus.malformed,
        }
    }

    pub fn empty() -> Self {
        Self {
            recipes: Vec::new(),
            autocomplete: Autocomplete::empty(),
            matcher: RecipeMatcher::default(),
            skipped: 0,
        }
    }

    /// Import the corpus file and build a library from it.
    pub fn load(path: &std::path::Path, min_query_len: usize) -> Result<Self, ImportError> {
        let corpus = importer::import_csv(path)?;
        Ok(Self::new(corpus, min_query_len))
    }

    pub fn stats(&self) -> Stats {
        Stats {
            recipes: self.recipes.len(),
            ingredients: self.autocomplete.len(),
            skipped_rows: self.skipped,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub data_path: PathBuf,
    pub min_query_len: usize,
}

/// Manager serves all queries from the active library. The library can be
/// rebuilt and swapped in without blocking readers.
pub struct Manager {
    library: ArcSwap<Library>,
    cfg: ManagerConfig,
}

impl Manager {
    pub fn new(library: Library, cfg: ManagerConfig) -> Self {
        Self {
            library: ArcSwap::from_pointee(library),
            cfg,
        }
    }

    /// Load the library from the configured corpus file. If the file can't
    /// be read, start with an empty library.
    pub fn load(cfg: ManagerConfig) -> Self {
        let library = match Library::load(&cfg.data_path, cfg.min_query_len) {
            Ok(lib) => lib,
            Err(e) => {
                log::error!(
                    "error loading recipes from {}: {}. starting with an empty index",
                    cfg.data_path.display(),
                    e
                );
                Library::empty()
            }
        };

        Self::new(library, cfg)
    }

    /// Snapshot of the active library.
    pub fn library(&self) -> Arc<Library> {
        self.library.load_full()
    }

    pub fn autocomplete(&self, q: &str, num: usize) -> Vec<String> {
        self.library.load().autocomplete.query(q, num)
    }

    pub fn popular(&self, num: usize) -> Vec<String> {
        self.library.load().autocomplete.popular(num)
    }

    /// Recipes sharing the most normalized ingredients with `ingredients`.
    pub fn match_recipes<S: AsRef<str>>(
        &self,
        ingredients: &[S],
        num: usize,
    ) -> Vec<RecipeSummary> {
        let lib = self.library.load();
        lib.matcher
            .match_recipes(ingredients, num)
            .into_iter()
            .filter_map(|(id, score)| lib.recipes.get(id).map(|r| RecipeSummary::new(r, score)))
            .collect()
    }

    pub fn recipe_detail(&self, id: usize) -> Result<RecipeDetail, Error> {
        let lib = self.library.load();
        let r = lib.recipes.get(id).ok_or(Error::NotFound)?;

        Ok(RecipeDetail {
            id: r.id,
            name: r.name.clone(),
            ingredients: r.ingredients.clone().unwrap_or_default(),
            instructions: importer::parse_instructions(&r.instructions),
        })
    }

    pub fn stats(&self) -> Stats {
        self.library.load().stats()
    }

    /// Rebuild the library from the corpus file and publish it in one swap.
    /// On error the active library is kept.
    pub fn reload(&self) -> Result<Stats, Error> {
        log::info!("reloading recipes from {}", self.cfg.data_path.display());

        let library = Library::load(&self.cfg.data_path, self.cfg.min_query_len)?;
        let stats = library.stats();
        self.library.store(Arc::new(library));

        log::info!(
            "reloaded {} recipes, {} ingredients",
            stats.recipes,
            stats.ingredients
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::Instructions;

    const CSV: &str = r#"Name,RecipeIngredientParts,RecipeInstructions,RecipeServings,Calories
Chicken Rice,"c(""chicken"", ""rice"")","c(""Cook rice."", ""Add chicken."")",4,400
Buttered Chicken,"c(""chicken"", ""butter"", ""garlic"")",Fry it all.,2,650
Broken,"c(""flour"", ",Nope.,1,100
Kale Salad,"c(""kale"", ""lemon"", ""olive oil"")","c(""Toss."")",NA,120
"#;

    fn config(path: PathBuf) -> ManagerConfig {
        ManagerConfig {
            data_path: path,
            min_query_len: 2,
        }
    }

    fn manager() -> Manager {
        let corpus = importer::read_csv(CSV.as_bytes()).unwrap();
        Manager::new(Library::new(corpus, 2), config(PathBuf::new()))
    }

    #[test]
    fn test_library() {
        let m = manager();
        let lib = m.library();
        assert_eq!(
            lib.stats(),
            Stats {
                recipes: 4,
                ingredients: 7,
                skipped_rows: 1,
            }
        );
        assert_eq!(lib.autocomplete.get("chicken").map(|e| e.count), Some(2));
        assert!(lib.autocomplete.get("flour").is_none());
    }

    #[test]
    fn test_autocomplete_and_popular() {
        let m = manager();
        assert_eq!(m.autocomplete("chi", 10), vec!["chicken"]);
        assert_eq!(m.autocomplete("oil", 10), vec!["olive oil"]);
        assert!(m.autocomplete("c", 10).is_empty());
        assert_eq!(m.popular(1), vec!["chicken"]);
    }

    #[test]
    fn test_match_recipes() {
        let m = manager();
        let out = m.match_recipes(&["Chicken", "2 tbsp butter"], 10);
        let got: Vec<(usize, usize)> = out.iter().map(|r| (r.id, r.score)).collect();
        assert_eq!(got, vec![(1, 2), (0, 1)]);
        assert_eq!(out[0].name, "Buttered Chicken");
        assert_eq!(out[0].servings, Some(2.0));
        assert_eq!(out[0].nutrition.calories, Some(650.0));
        assert_eq!(out[0].ingredients, vec!["chicken", "butter", "garlic"]);

        assert!(m.match_recipes(&["flour"], 10).is_empty());
    }

    #[test]
    fn test_recipe_detail() {
        let m = manager();
        let r = m.recipe_detail(0).unwrap();
        assert_eq!(r.name, "Chicken Rice");
        assert_eq!(r.ingredients, vec!["chicken", "rice"]);
        assert_eq!(
            r.instructions,
            Instructions::Steps(vec!["Cook rice.".to_string(), "Add chicken.".to_string()])
        );

        let r = m.recipe_detail(1).unwrap();
        assert_eq!(r.instructions, Instructions::Raw("Fry it all.".to_string()));

        let r = m.recipe_detail(2).unwrap();
        assert!(r.ingredients.is_empty());

        assert!(matches!(m.recipe_detail(4), Err(Error::NotFound)));
    }

    #[test]
    fn test_load_missing_file() {
        let m = Manager::load(config(PathBuf::from("/nonexistent/recipes.csv")));
        assert_eq!(m.stats(), Stats::default());
        assert!(m.autocomplete("chicken", 10).is_empty());
        assert!(m.popular(50).is_empty());
        assert!(matches!(m.recipe_detail(0), Err(Error::NotFound)));
    }

    #[test]
    fn test_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Name,RecipeIngredientParts\nToast,\"c(\"\"bread\"\")\"\n")
            .unwrap();

        let m = Manager::load(config(file.path().to_path_buf()));
        let before = m.library();
        assert_eq!(m.autocomplete("bre", 10), vec!["bread"]);

        std::fs::write(file.path(), CSV).unwrap();
        let stats = m.reload().unwrap();
        assert_eq!(stats.recipes, 4);
        assert!(m.autocomplete("bre", 10).is_empty());
        assert_eq!(m.autocomplete("kal", 10), vec!["kale"]);

        // Snapshots taken before the swap are unaffected.
        assert_eq!(before.autocomplete.query("bre", 10), vec!["bread"]);
        assert_eq!(before.recipes.len(), 1);
    }

    #[test]
    fn test_reload_error_keeps_library() {
        let m = manager();
        assert!(matches!(m.reload(), Err(Error::Import(_))));
        assert_eq!(m.stats().recipes, 4);
    }
}
