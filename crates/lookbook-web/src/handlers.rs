use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use lookbook_core::{CatalogQuery, LookbookError, NewHairstyle};

use crate::WebState;
use crate::dto::{
    FavoriteAddedResponse, FavoriteRemovedResponse, FavoriteStatusResponse, FavoritesResponse,
    PreviewSearchRequest, PreviewSearchResponse,
};
use crate::error::lookbook_error_response;

/// Distinct facet values straight from the catalog, pose labels in backend
/// form. Clients translate poses for display themselves.
pub async fn list_filters(State(state): State<WebState>) -> Response {
    match state.app.vocabularies() {
        Ok(vocab) => (StatusCode::OK, Json(vocab)).into_response(),
        Err(err) => lookbook_error_response(err, "filters.list"),
    }
}

pub async fn list_hairstyles(
    State(state): State<WebState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = CatalogQuery::from_query_pairs(
        pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())),
    );
    match state.app.catalog().list(&query) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(err) => lookbook_error_response(err, "hairstyles.list"),
    }
}

pub async fn get_hairstyle(State(state): State<WebState>, Path(id): Path<String>) -> Response {
    match state.app.catalog().get(&id) {
        Ok(Some(row)) => (StatusCode::OK, Json(row)).into_response(),
        Ok(None) => lookbook_error_response(LookbookError::NotFound(id), "hairstyles.get"),
        Err(err) => lookbook_error_response(err, "hairstyles.get"),
    }
}

pub async fn create_hairstyle(
    State(state): State<WebState>,
    Json(new): Json<NewHairstyle>,
) -> Response {
    if let Err(err) = validate_new_hairstyle(&new) {
        return lookbook_error_response(err, "hairstyles.create");
    }
    match state.app.catalog().insert(&new) {
        Ok(row) => (StatusCode::CREATED, Json(row)).into_response(),
        Err(err) => lookbook_error_response(err, "hairstyles.create"),
    }
}

/// Run the query interpreter against the current catalog vocabularies
/// without touching any stored state.
pub async fn preview_search(
    State(state): State<WebState>,
    Json(request): Json<PreviewSearchRequest>,
) -> Response {
    match state.app.preview_search(&request.state, &request.raw_text) {
        Ok(outcome) => {
            (StatusCode::OK, Json(PreviewSearchResponse::from(outcome))).into_response()
        }
        Err(err) => lookbook_error_response(err, "search.preview"),
    }
}

pub async fn list_favorites(
    State(state): State<WebState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.app.catalog().list_favorites(&user_id) {
        Ok(favorites) => (StatusCode::OK, Json(FavoritesResponse { favorites })).into_response(),
        Err(err) => lookbook_error_response(err, "favorites.list"),
    }
}

pub async fn check_favorite(
    State(state): State<WebState>,
    Path((user_id, hairstyle_id)): Path<(String, String)>,
) -> Response {
    match state.app.catalog().is_favorite(&user_id, &hairstyle_id) {
        Ok(is_favorite) => {
            (StatusCode::OK, Json(FavoriteStatusResponse { is_favorite })).into_response()
        }
        Err(err) => lookbook_error_response(err, "favorites.check"),
    }
}

pub async fn add_favorite(
    State(state): State<WebState>,
    Path((user_id, hairstyle_id)): Path<(String, String)>,
) -> Response {
    match state.app.catalog().add_favorite(&user_id, &hairstyle_id) {
        Ok(added) => (
            StatusCode::OK,
            Json(FavoriteAddedResponse {
                success: true,
                added,
            }),
        )
            .into_response(),
        Err(err) => lookbook_error_response(err, "favorites.add"),
    }
}

pub async fn remove_favorite(
    State(state): State<WebState>,
    Path((user_id, hairstyle_id)): Path<(String, String)>,
) -> Response {
    match state.app.catalog().remove_favorite(&user_id, &hairstyle_id) {
        Ok(removed) => (
            StatusCode::OK,
            Json(FavoriteRemovedResponse {
                success: true,
                removed,
            }),
        )
            .into_response(),
        Err(err) => lookbook_error_response(err, "favorites.remove"),
    }
}

fn validate_new_hairstyle(new: &NewHairstyle) -> lookbook_core::Result<()> {
    for (field, value) in [
        ("name", &new.name),
        ("category", &new.category),
        ("length", &new.length),
        ("texture", &new.texture),
        ("image_url", &new.image_url),
    ] {
        if value.trim().is_empty() {
            return Err(LookbookError::Validation(format!(
                "missing required field: {field}"
            )));
        }
    }
    Ok(())
}
