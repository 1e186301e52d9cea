// Public fallible APIs in this crate share one concrete error contract (`LookbookError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod catalog;
pub mod error;
pub mod facet;
pub mod filter_state;
pub mod gallery;
pub mod interpreter;
pub mod models;
pub mod pose_labels;
pub(crate) mod rules;
pub(crate) mod text;

use std::path::Path;

pub use catalog::CatalogStore;
pub use error::{LookbookError, Result};
pub use facet::{Facet, Vocabularies};
pub use filter_state::{FacetSelections, FilterState};
pub use gallery::{FavoriteEdit, FetchTicket, GallerySession};
pub use interpreter::{MatchResult, SearchOutcome, apply_search, interpret};
pub use models::{CatalogQuery, Hairstyle, NewHairstyle};

/// Facade over the catalog store, wiring the pieces the web and CLI
/// surfaces need behind one handle.
#[derive(Debug, Clone)]
pub struct Lookbook {
    catalog: CatalogStore,
}

impl Lookbook {
    /// Open (or create) the catalog database at `path` and run migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let catalog = CatalogStore::open(path)?;
        Ok(Self { catalog })
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Insert the bundled sample styles when the catalog is empty.
    /// Returns the number of rows inserted (zero when already populated).
    pub fn seed_if_empty(&self) -> Result<usize> {
        self.catalog.seed_sample_data()
    }

    /// Vocabulary snapshot with raw backend labels, as served by `/api/filters`.
    pub fn vocabularies(&self) -> Result<Vocabularies> {
        self.catalog.vocabularies()
    }

    /// Start a browsing session: vocabularies are snapshotted once and pose
    /// labels are translated to their display form.
    pub fn start_session(&self) -> Result<GallerySession> {
        Ok(GallerySession::new(self.vocabularies()?))
    }

    /// Run the query interpreter against the current catalog vocabularies
    /// without mutating any state. Used by the search preview endpoint.
    pub fn preview_search(&self, state: &FilterState, raw_text: &str) -> Result<SearchOutcome> {
        let vocab = self.vocabularies()?.into_display();
        Ok(apply_search(state, raw_text, &vocab))
    }
}
