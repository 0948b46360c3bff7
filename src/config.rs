use std::path::{Path, PathBuf};

use crate::{handlers::Consts, models::Config};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_DATA_PATH: &str = "recipes.csv";

/// Load and merge one or more config files. Missing files are an error
/// except for the default `config.toml`, which falls back to defaults.
pub fn load_all(paths: &[PathBuf]) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config: Option<Config> = None;

    for path in paths {
        if !path.exists() && paths.len() == 1 && path.as_path() == Path::new("config.toml") {
            log::info!("no config file found. using defaults");
            break;
        }

        log::info!("loading config: {}", path.display());
        let c = read_file(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        if let Some(ref mut existing) = config {
            // Merge configs.
            merge(existing, c);
        } else {
            config = Some(c);
        }
    }

    let mut config = config.unwrap_or_default();
    fill_defaults(&mut config);
    Ok(config)
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Application constants derived from the config.
pub fn consts(config: &Config) -> Consts {
    Consts {
        enable_reload: config.app.enable_reload,
        max_suggestions: config.index.max_suggestions,
        min_query_len: config.index.min_query_len,
        num_popular: config.index.num_popular,
        max_recipe_matches: config.index.max_recipe_matches,
    }
}

/// Load configuration from a given TOML file.
fn read_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
fn merge(dest: &mut Config, src: Config) {
    // Merge app config.
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.data_path.is_empty() {
        dest.app.data_path = src.app.data_path;
    }
    dest.app.enable_reload = src.app.enable_reload;

    // Merge index config.
    if src.index.max_suggestions > 0 {
        dest.index.max_suggestions = src.index.max_suggestions;
    }
    if src.index.min_query_len > 0 {
        dest.index.min_query_len = src.index.min_query_len;
    }
    if src.index.num_popular > 0 {
        dest.index.num_popular = src.index.num_popular;
    }
    if src.index.max_recipe_matches > 0 {
        dest.index.max_recipe_matches = src.index.max_recipe_matches;
    }
}

/// Replace empty and zero values with the defaults.
fn fill_defaults(config: &mut Config) {
    let def = Consts::default();

    if config.app.address.is_empty() {
        config.app.address = DEFAULT_ADDRESS.to_string();
    }
    if config.app.data_path.is_empty() {
        config.app.data_path = DEFAULT_DATA_PATH.to_string();
    }
    if config.index.max_suggestions == 0 {
        config.index.max_suggestions = def.max_suggestions;
    }
    if config.index.min_query_len == 0 {
        config.index.min_query_len = def.min_query_len;
    }
    if config.index.num_popular == 0 {
        config.index.num_popular = def.num_popular;
    }
    if config.index.max_recipe_matches == 0 {
        config.index.max_recipe_matches = def.max_recipe_matches;
    }
}
