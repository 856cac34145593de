#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use hotelier_api::auth::jwt::JwtConfig;
use hotelier_api::auth::password::hash_password;
use hotelier_api::config::ServerConfig;
use hotelier_api::router::build_app_router;
use hotelier_api::state::AppState;
use hotelier_api::ws::WsManager;
use hotelier_db::models::user::{CreateUser, User};
use hotelier_db::repositories::UserRepo;
use hotelier_events::EventBus;

pub const ADMIN_EMAIL: &str = "admin@hotel.test";
pub const ADMIN_PASSWORD: &str = "front-desk-password";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin: None,
    }
}

/// Build the state used by [`build_test_app`]. Tests that need to observe
/// published events keep a handle to `event_bus`.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
    }
}

/// The production router and middleware stack over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool), &test_config())
}

pub fn build_test_app_with_state(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_admin(pool: &PgPool) -> User {
    let input = CreateUser {
        email: ADMIN_EMAIL.to_string(),
        password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

/// Create the administrator and sign in, returning an access token.
pub async fn admin_token(pool: &PgPool) -> String {
    create_admin(pool).await;
    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a room through the API and return its JSON.
pub async fn create_room(app: Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app, "/api/v1/rooms", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

pub fn room_body(name: &str, capacity: i32, price: f64) -> Value {
    json!({
        "name": name,
        "room_type": "Deluxe",
        "price": price,
        "capacity": capacity,
    })
}

pub fn booking_body(room_id: i64) -> Value {
    json!({
        "room_id": room_id,
        "customer_name": "Ada Lovelace",
        "phone_number": "+44 20 7946 0000",
        "email": "ada@example.com",
        "nationality": "GB",
        "id_number": "P1234567",
        "check_in_date": "2024-01-01T00:00:00Z",
        "check_out_date": "2024-01-04T00:00:00Z",
        "adults": 2,
        "children": 0,
        "accept_terms": true,
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, body, None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, body, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, body, Some(token))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PATCH, uri, body, Some(token))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
