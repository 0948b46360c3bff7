use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mealmate")]
#[command(about = "mealmate - Ingredient autocomplete and recipe search over a recipe corpus.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Path to the recipes CSV file. Overrides `data_path` in the config.
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Print ingredient suggestions for a query.
    Suggest {
        /// Partial ingredient name.
        query: String,

        /// Maximum number of suggestions.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the most frequent ingredients.
    Popular {
        /// Maximum number of ingredients.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the recipes that use the most of the given ingredients.
    Match {
        /// Ingredients to match.
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
}
