use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use lookbook_core::LookbookError;

#[expect(
    clippy::needless_pass_by_value,
    reason = "handlers naturally own error values from `Result` and pass them through"
)]
pub fn lookbook_error_response(err: LookbookError, operation: &str) -> Response {
    let status = status_for_lookbook_error(&err);
    let payload = err.to_payload(operation);
    (status, Json(payload)).into_response()
}

fn status_for_lookbook_error(err: &LookbookError) -> StatusCode {
    match err {
        LookbookError::InvalidFacet(_)
        | LookbookError::UnknownValue(_)
        | LookbookError::Validation(_) => StatusCode::BAD_REQUEST,
        LookbookError::NotFound(_) => StatusCode::NOT_FOUND,
        LookbookError::Io(_)
        | LookbookError::Json(_)
        | LookbookError::Sqlite(_)
        | LookbookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
