use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;


pub use args::{FavoritesArgs, FavoritesCommand, SearchArgs, ServeArgs, StylesArgs};

#[derive(Debug, Parser)]
#[command(name = "lookbook")]
#[command(about = "Hairstyle lookbook catalog and search", version)]
pub struct Cli {
    /// Path to the catalog database.
    #[arg(long, default_value = "lookbook.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve(ServeArgs),
    /// Populate an empty catalog with the bundled sample styles.
    Seed,
    /// Print the distinct facet values the catalog currently offers.
    Filters,
    /// List catalog entries, optionally filtered per facet.
    Styles(StylesArgs),
    /// Interpret a free-text query against the catalog vocabularies.
    Search(SearchArgs),
    /// Inspect or edit a user's favorites.
    Favorites(FavoritesArgs),
}
