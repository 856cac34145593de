pub mod auth;
pub mod booking;
pub mod health;
pub mod room;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                                   live event stream
///
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (admin)
///
/// /rooms                                list (public), create (admin)
/// /rooms/availability                   availability search (public)
/// /rooms/suggest-number                 room-number suggestion (admin)
/// /rooms/stats                          per-category counts (admin)
/// /rooms/form-options                   room form vocabulary (admin)
/// /rooms/{id}                           get (public), update, delete (admin)
///
/// /bookings                             create (public), list (admin)
/// /bookings/quote                       price preview (public)
/// /bookings/{id}                        get (public), edit notes (admin)
/// /bookings/{id}/status                 stay status (admin)
/// /bookings/{id}/payment-status         payment status (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/rooms", room::router())
        .nest("/bookings", booking::router())
}
