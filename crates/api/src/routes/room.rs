//! Route definitions for the `/rooms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::room;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /availability       -> availability
/// GET    /suggest-number     -> suggest_number
/// GET    /stats              -> stats
/// GET    /form-options       -> form_options
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::list).post(room::create))
        .route("/availability", get(room::availability))
        .route("/suggest-number", get(room::suggest_number))
        .route("/stats", get(room::stats))
        .route("/form-options", get(room::form_options))
        .route(
            "/{id}",
            get(room::get_by_id).put(room::update).delete(room::delete),
        )
}
