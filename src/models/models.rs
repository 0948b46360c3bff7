use serde::{Deserialize, Serialize, Serializer};

/// Marker for nutrition values missing from the corpus.
pub const NOT_AVAILABLE: &str = "N/A";

/// Recipe loaded from the corpus. `id` is its position in the corpus.
#[derive(Debug, Clone, Default)]
pub struct Recipe {
    pub id: usize,
    pub name: String,

    // Parsed ingredient list (lowercased). None if the list failed to parse.
    pub ingredients: Option<Vec<String>>,
    pub instructions: String,
    pub servings: Option<f64>,
    pub nutrition: Nutrition,
}

/// Per-serving nutrition facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    #[serde(serialize_with = "or_not_available")]
    pub calories: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    pub total_fat: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    pub saturated_fat: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    pub sodium: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    pub carbohydrate: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    pub sugar: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    pub protein: Option<f64>,
}

/// Serialize a missing number as the "N/A" string.
fn or_not_available<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) => s.serialize_f64(*v),
        None => s.serialize_str(NOT_AVAILABLE),
    }
}

/// Recipe in an ingredient match result.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: usize,
    pub name: String,
    #[serde(serialize_with = "or_not_available")]
    pub servings: Option<f64>,
    pub ingredients: Vec<String>,
    pub score: usize,
    pub nutrition: Nutrition,
}

impl RecipeSummary {
    pub fn new(r: &Recipe, score: usize) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            servings: r.servings,
            ingredients: r.ingredients.clone().unwrap_or_default(),
            score,
            nutrition: r.nutrition.clone(),
        }
    }
}

/// Cooking instructions: a list of steps, or the raw text when the corpus
/// value is not a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Instructions {
    Steps(Vec<String>),
    Raw(String),
}

/// Single recipe view.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: usize,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
}

/// Library statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub recipes: usize,
    pub ingredients: usize,
    pub skipped_rows: usize,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub data_path: String,
    #[serde(default)]
    pub enable_reload: bool,
}

/// Index and result limits. Zero means "use the default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub max_suggestions: usize,
    #[serde(default)]
    pub min_query_len: usize,
    #[serde(default)]
    pub num_popular: usize,
    #[serde(default)]
    pub max_recipe_matches: usize,
}
