use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, default_value_t = 5001)]
    pub port: u16,
}

#[derive(Debug, Args)]
pub struct StylesArgs {
    /// Comma-separated values per facet, e.g. `--length Short,Medium`.
    #[arg(long)]
    pub length: Option<String>,
    #[arg(long)]
    pub texture: Option<String>,
    #[arg(long)]
    pub face_shape: Option<String>,
    #[arg(long)]
    pub style_type: Option<String>,
    #[arg(long)]
    pub pose: Option<String>,
    #[arg(long)]
    pub ethnicity: Option<String>,
    /// Substring search over name, description, and tags.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// The raw query text, interpreted word by word.
    #[arg(allow_hyphen_values = true)]
    pub query: String,
}

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    pub user_id: String,

    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List the user's favorites, most recently added first.
    List,
    /// Mark a hairstyle as a favorite.
    Add { hairstyle_id: String },
    /// Remove a hairstyle from the favorites.
    Remove { hairstyle_id: String },
}
