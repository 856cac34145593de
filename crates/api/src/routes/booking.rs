//! Route definitions for the `/bookings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /quote                -> quote
/// GET    /{id}                 -> get_by_id
/// PATCH  /{id}                 -> update_details
/// PUT    /{id}/status          -> update_status
/// PUT    /{id}/payment-status  -> update_payment_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list).post(booking::create))
        .route("/quote", get(booking::quote))
        .route(
            "/{id}",
            get(booking::get_by_id).patch(booking::update_details),
        )
        .route("/{id}/status", put(booking::update_status))
        .route("/{id}/payment-status", put(booking::update_payment_status))
}
