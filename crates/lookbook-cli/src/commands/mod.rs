use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use lookbook_core::{CatalogQuery, FilterState, Lookbook};

use crate::cli::{Commands, FavoritesCommand, StylesArgs};


pub(crate) fn run_from_db(db: &Path, command: Commands) -> Result<()> {
    let app = Lookbook::open(db).context("failed to open catalog")?;

    match command {
        Commands::Serve(args) => {
            return lookbook_web::serve_web(app, &args.host, args.port);
        }
        Commands::Seed => {
            let seeded = app.seed_if_empty()?;
            print_json(&json!({
                "status": "ok",
                "seeded": seeded,
            }))?;
        }
        Commands::Filters => {
            print_json(&app.vocabularies()?)?;
        }
        Commands::Styles(args) => {
            let query = styles_query(&args);
            print_json(&app.catalog().list(&query)?)?;
        }
        Commands::Search(args) => {
            let outcome = app.preview_search(&FilterState::default(), &args.query)?;
            print_json(&outcome)?;
        }
        Commands::Favorites(args) => match args.command {
            FavoritesCommand::List => {
                print_json(&app.catalog().list_favorites(&args.user_id)?)?;
            }
            FavoritesCommand::Add { hairstyle_id } => {
                let added = app.catalog().add_favorite(&args.user_id, &hairstyle_id)?;
                print_json(&json!({
                    "status": "ok",
                    "added": added,
                }))?;
            }
            FavoritesCommand::Remove { hairstyle_id } => {
                let removed = app.catalog().remove_favorite(&args.user_id, &hairstyle_id)?;
                print_json(&json!({
                    "status": "ok",
                    "removed": removed,
                }))?;
            }
        },
    }
    Ok(())
}

fn styles_query(args: &StylesArgs) -> CatalogQuery {
    let pairs = [
        ("length", args.length.as_deref()),
        ("texture", args.texture.as_deref()),
        ("face_shape", args.face_shape.as_deref()),
        ("style_type", args.style_type.as_deref()),
        ("pose", args.pose.as_deref()),
        ("ethnicity", args.ethnicity.as_deref()),
        ("search", args.search.as_deref()),
    ];
    CatalogQuery::from_query_pairs(
        pairs
            .iter()
            .filter_map(|&(key, value)| value.map(|v| (key, v))),
    )
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
