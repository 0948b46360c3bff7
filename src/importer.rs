use std::{io, path::Path};

use serde::Deserialize;

use crate::models::{Instructions, Nutrition, Recipe};

/// Maximum length of a malformed value quoted in an error.
const ERR_SNIPPET_LEN: usize = 40;

/// A single ingredient-list value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated list: {0}")]
    Unterminated(String),
    #[error("invalid list: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// The corpus file could not be read at all.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Recipes read from the corpus.
#[derive(Debug, Default)]
pub struct Corpus {
    pub recipes: Vec<Recipe>,

    // CSV records that could not be decoded.
    pub skipped: usize,

    // Recipes whose ingredient list failed to parse.
    pub malformed: usize,
}

/// Corpus CSV row. Columns are picked by header name, others are ignored.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "RecipeIngredientParts", default)]
    ingredients: String,
    #[serde(rename = "RecipeInstructions", default)]
    instructions: String,
    #[serde(
        rename = "RecipeServings",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    servings: Option<f64>,
    #[serde(rename = "Calories", default, deserialize_with = "csv::invalid_option")]
    calories: Option<f64>,
    #[serde(rename = "FatContent", default, deserialize_with = "csv::invalid_option")]
    fat: Option<f64>,
    #[serde(
        rename = "SaturatedFatContent",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    saturated_fat: Option<f64>,
    #[serde(
        rename = "SodiumContent",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    sodium: Option<f64>,
    #[serde(
        rename = "CarbohydrateContent",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    carbohydrate: Option<f64>,
    #[serde(
        rename = "SugarContent",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    sugar: Option<f64>,
    #[serde(
        rename = "ProteinContent",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    protein: Option<f64>,
}

/// Import recipes from a CSV file.
pub fn import_csv(file_path: &Path) -> Result<Corpus, ImportError> {
    log::info!("importing recipes from {} ...", file_path.display());

    let file = std::fs::File::open(file_path)?;
    let corpus = read_csv(file)?;

    log::info!(
        "finished. imported {} recipes ({} records skipped, {} malformed ingredient lists)",
        corpus.recipes.len(),
        corpus.skipped,
        corpus.malformed
    );

    Ok(corpus)
}

/// Read recipes from CSV with a header row. Undecodable records and
/// malformed ingredient lists are logged and skipped. I/O errors abort.
pub fn read_csv<R: io::Read>(r: R) -> Result<Corpus, ImportError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(r);
    let mut out = Corpus::default();

    for (n, result) in reader.deserialize::<Row>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(e.into());
                }
                log::warn!("record {}: skipping: {}", n + 1, e);
                out.skipped += 1;
                continue;
            }
        };

        let id = out.recipes.len();
        let ingredients = match parse_ingredient_list(&row.ingredients) {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!("recipe {} ({}): malformed ingredients: {}", id, row.name, e);
                out.malformed += 1;
                None
            }
        };

        out.recipes.push(Recipe {
            id,
            name: row.name.trim().to_string(),
            ingredients,
            instructions: row.instructions,
            servings: row.servings,
            nutrition: Nutrition {
                calories: row.calories,
                total_fat: row.fat,
                saturated_fat: row.saturated_fat,
                sodium: row.sodium,
                carbohydrate: row.carbohydrate,
                sugar: row.sugar,
                protein: row.protein,
            },
        });
    }

    Ok(out)
}

/// Parse an ingredient-list value into raw (lowercased) ingredient strings.
///
/// Accepts `c("a", "b")`, `["a", "b"]`, a single quoted `"a"` and plain
/// comma separated text. Empty values, `NA` and `character(0)` are empty lists.
pub fn parse_ingredient_list(raw: &str) -> Result<Vec<String>, ParseError> {
    let s = raw.trim().to_lowercase();
    if s.is_empty() || s == "na" || s == "character(0)" {
        return Ok(Vec::new());
    }

    match parse_list(&s) {
        Some(res) => res,
        None => Ok(s
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()),
    }
}

/// Parse instructions as a list of steps, keeping the raw text if the value
/// is not a list literal.
pub fn parse_instructions(raw: &str) -> Instructions {
    let s = raw.trim();
    match parse_list(s) {
        Some(Ok(steps)) => Instructions::Steps(steps),
        Some(Err(e)) => {
            log::debug!("instructions are not a valid list: {}", e);
            Instructions::Raw(s.to_string())
        }
        None => Instructions::Raw(s.to_string()),
    }
}

/// Parse a list literal. `c(...)` is rewritten to `[...]` and read as a JSON
/// array of strings. Returns None if `s` does not look like a list literal.
fn parse_list(s: &str) -> Option<Result<Vec<String>, ParseError>> {
    if let Some(inner) = s.strip_prefix("c(") {
        let res = match inner.strip_suffix(')') {
            Some(inner) => from_json(&format!("[{}]", inner)),
            None => Err(ParseError::Unterminated(snippet(s))),
        };
        return Some(res);
    }

    if s.starts_with('[') {
        return Some(from_json(s));
    }

    if s.starts_with('"') {
        let res = serde_json::from_str::<String>(s)
            .map(|v| vec![v])
            .map_err(ParseError::from);
        return Some(res);
    }

    None
}

fn from_json(s: &str) -> Result<Vec<String>, ParseError> {
    Ok(serde_json::from_str(s)?)
}

fn snippet(s: &str) -> String {
    match s.char_indices().nth(ERR_SNIPPET_LEN) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s.to_string(),
    }
}
