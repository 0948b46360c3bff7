use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Quantity followed by a measurement unit: "2 tbsp", "1/2 cup", "500g", "2 cups".
    static ref RE_QUANTITY: Regex =
        Regex::new(r"\d+[/\d\s]*(?:tbsp|tsp|cup|oz|g|ml|l|lb|kg)s?\b").unwrap();
    static ref RE_PUNCT: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref RE_SPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a raw ingredient name to its canonical form: lowercase, drop
/// the preparation note after the first comma, strip quantities with units
/// and punctuation, collapse whitespace.
///
/// This is the only place ingredient names are canonicalized. Index build,
/// autocomplete queries and recipe matching all go through it.
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let name = match lower.split_once(',') {
        Some((name, _note)) => name,
        None => lower.as_str(),
    };

    let name = RE_QUANTITY.replace_all(name, "");
    let mut name = RE_PUNCT.replace_all(&name, "").into_owned();

    // Removing punctuation can glue a quantity to its unit ("2.cup").
    while RE_QUANTITY.is_match(&name) {
        name = RE_QUANTITY.replace_all(&name, "").into_owned();
    }

    RE_SPACES.replace_all(name.trim(), " ").into_owned()
}
