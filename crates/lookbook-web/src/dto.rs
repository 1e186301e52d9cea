use serde::{Deserialize, Serialize};

use lookbook_core::{FilterState, Hairstyle, MatchResult, SearchOutcome};

/// Body for the search preview endpoint. `state` defaults to an empty
/// filter state when omitted.
#[derive(Debug, Deserialize)]
pub struct PreviewSearchRequest {
    #[serde(default)]
    pub state: FilterState,
    pub raw_text: String,
}

/// Preview result: the merged state, what matched, whether anything
/// changed, and the backend query pairs the merged state encodes to.
#[derive(Debug, Serialize)]
pub struct PreviewSearchResponse {
    pub state: FilterState,
    pub matches: MatchResult,
    pub changed: bool,
    pub query: Vec<(String, String)>,
}

impl From<SearchOutcome> for PreviewSearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let query = outcome.state.to_query_pairs();
        Self {
            state: outcome.state,
            matches: outcome.matches,
            changed: outcome.changed,
            query,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Hairstyle>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteAddedResponse {
    pub success: bool,
    pub added: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteRemovedResponse {
    pub success: bool,
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatusResponse {
    pub is_favorite: bool,
}
