//! Session state for a browsing client: a vocabulary snapshot, the current
//! filter state, a fetch sequence for last-request-wins ordering, and an
//! optimistic favorites set with rollback.

use std::collections::HashSet;

use crate::error::Result;
use crate::facet::{Facet, Vocabularies};
use crate::filter_state::FilterState;
use crate::interpreter::{SearchOutcome, apply_search};

/// Handle for an in-flight catalog fetch. `seq` identifies the request;
/// only the ticket matching the session's latest sequence may apply its
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: Vec<(String, String)>,
}

/// Record of an optimistic favorite flip, kept so a failed persistence call
/// can restore the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEdit {
    pub hairstyle_id: String,
    pub was_favorite: bool,
}

/// One client's browsing session.
///
/// Vocabularies are snapshotted at construction with pose labels in display
/// form; every filter transition goes through this type so the sequence
/// token stays in step with the state.
#[derive(Debug, Clone)]
pub struct GallerySession {
    vocab: Vocabularies,
    state: FilterState,
    seq: u64,
    favorites: HashSet<String>,
}

impl GallerySession {
    #[must_use]
    pub fn new(vocab: Vocabularies) -> Self {
        Self {
            vocab: vocab.into_display(),
            state: FilterState::default(),
            seq: 0,
            favorites: HashSet::new(),
        }
    }

    #[must_use]
    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocab
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Interpret `raw_text` and merge it into the session state. Returns
    /// `None` when the merged state is equivalent to the current one, in
    /// which case no fetch should be issued.
    pub fn submit_search(&mut self, raw_text: &str) -> Option<FetchTicket> {
        let SearchOutcome { state, changed, .. } = apply_search(&self.state, raw_text, &self.vocab);
        if !changed {
            return None;
        }
        self.state = state;
        Some(self.issue_ticket())
    }

    /// Flip a single facet value on or off.
    pub fn toggle(&mut self, facet: Facet, value: &str) -> Result<FetchTicket> {
        self.state = self.state.toggle(facet, value, &self.vocab)?;
        Ok(self.issue_ticket())
    }

    /// Drop every selection and the residual search. Returns `None` when
    /// the state was already clear.
    pub fn clear_all(&mut self) -> Option<FetchTicket> {
        if self.state.is_clear() {
            return None;
        }
        self.state = self.state.clear_all();
        Some(self.issue_ticket())
    }

    /// Whether a fetch response for `seq` is still the latest one. Stale
    /// responses must be dropped, not merged.
    #[must_use]
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    #[must_use]
    pub fn current_seq(&self) -> u64 {
        self.seq
    }

    /// Apply a favorite flip locally before persistence completes. The
    /// returned edit feeds `rollback_favorite` if persistence fails.
    pub fn set_favorite(&mut self, hairstyle_id: &str, favorite: bool) -> FavoriteEdit {
        let was_favorite = if favorite {
            !self.favorites.insert(hairstyle_id.to_string())
        } else {
            self.favorites.remove(hairstyle_id)
        };
        FavoriteEdit {
            hairstyle_id: hairstyle_id.to_string(),
            was_favorite,
        }
    }

    /// Undo an optimistic favorite flip.
    pub fn rollback_favorite(&mut self, edit: &FavoriteEdit) {
        if edit.was_favorite {
            self.favorites.insert(edit.hairstyle_id.clone());
        } else {
            self.favorites.remove(&edit.hairstyle_id);
        }
    }

    #[must_use]
    pub fn is_favorite(&self, hairstyle_id: &str) -> bool {
        self.favorites.contains(hairstyle_id)
    }

    /// Replace the local favorites set with the persisted one, e.g. after
    /// loading a user's favorites from the catalog.
    pub fn sync_favorites(&mut self, ids: impl IntoIterator<Item = String>) {
        self.favorites = ids.into_iter().collect();
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.seq += 1;
        FetchTicket {
            seq: self.seq,
            query: self.state.to_query_pairs(),
        }
    }
}
