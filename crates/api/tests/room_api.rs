//! HTTP-level tests for the `/rooms` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_room, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth,
    room_body,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_fills_number_and_amenities_from_category(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = room_body("Sea Suite", 2, 320.0);
    body["category"] = json!("vip");
    let room = create_room(app, &token, body).await;

    assert_eq!(room["room_number"], "301");
    assert_eq!(room["category"], "vip");
    assert_eq!(room["status"], "available");
    let amenities = room["amenities"].as_array().unwrap();
    assert!(amenities.contains(&json!("Jacuzzi")));
    assert!(amenities.contains(&json!("Sea View")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_keeps_explicit_number_and_amenities(pool: PgPool) {
    let token = common::admin_token(&pool).await;

    let mut body = room_body("Garden", 2, 90.0);
    body["room_number"] = json!(" 150 ");
    body["amenities"] = json!(["TV", "TV", " Wi-Fi "]);
    let room = create_room(common::build_test_app(pool), &token, body).await;

    assert_eq!(room["room_number"], "150");
    assert_eq!(room["category"], "single");
    assert_eq!(room["amenities"], json!(["TV", "Wi-Fi"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_admin(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/rooms",
        room_body("Garden", 2, 90.0),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_capacity_and_price_are_rejected(pool: PgPool) {
    let token = common::admin_token(&pool).await;

    for body in [
        room_body("Tiny", 0, 50.0),
        room_body("Cheap", 2, -1.0),
        room_body("   ", 2, 50.0),
    ] {
        let response =
            post_json_auth(common::build_test_app(pool.clone()), "/api/v1/rooms", body, &token)
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let rooms = body_json(get(common::build_test_app(pool), "/api/v1/rooms").await).await;
    assert!(rooms.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_validates_and_patches(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let room = create_room(
        common::build_test_app(pool.clone()),
        &token,
        room_body("Garden", 2, 90.0),
    )
    .await;
    let uri = format!("/api/v1/rooms/{}", room["id"]);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "capacity": 0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "price": 110.5, "status": "maintenance" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["price"], 110.5);
    assert_eq!(updated["status"], "maintenance");
    assert_eq!(updated["name"], "Garden");

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/rooms/99999",
        json!({ "price": 1.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cleared_number_on_update_is_resuggested(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    for number in ["101", "103"] {
        let mut body = room_body("Single", 1, 60.0);
        body["room_number"] = json!(number);
        create_room(common::build_test_app(pool.clone()), &token, body).await;
    }
    let mut body = room_body("Single", 1, 60.0);
    body["room_number"] = json!("150");
    let room = create_room(common::build_test_app(pool.clone()), &token, body).await;
    let uri = format!("/api/v1/rooms/{}", room["id"]);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "room_number": "  " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["room_number"], "102");

    // Moving category picks from the new block.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "room_number": "", "category": "vip" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["room_number"], "301");
    assert_eq!(updated["category"], "vip");

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/rooms/99999",
        json!({ "room_number": "" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_then_get_is_404(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let room = create_room(
        common::build_test_app(pool.clone()),
        &token,
        room_body("Garden", 2, 90.0),
    )
    .await;
    let uri = format!("/api/v1/rooms/{}", room["id"]);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = delete_auth(common::build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Suggestion / stats / listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn suggestion_fills_the_first_gap(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    for number in ["101", "102", "104"] {
        let mut body = room_body("Single", 1, 60.0);
        body["room_number"] = json!(number);
        create_room(common::build_test_app(pool.clone()), &token, body).await;
    }

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/rooms/suggest-number?category=single",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["room_number"], "103");
    assert_eq!(json["category"], "single");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stats_count_per_category_and_status(pool: PgPool) {
    let token = common::admin_token(&pool).await;

    let mut comfort = room_body("Comfort", 2, 120.0);
    comfort["category"] = json!("comfort");
    create_room(common::build_test_app(pool.clone()), &token, comfort).await;

    let mut busy = room_body("Busy", 2, 60.0);
    busy["status"] = json!("occupied");
    create_room(common::build_test_app(pool.clone()), &token, busy).await;
    create_room(
        common::build_test_app(pool.clone()),
        &token,
        room_body("Free", 2, 60.0),
    )
    .await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/rooms/stats", &token).await;
    let stats = body_json(response).await;
    assert_eq!(stats["single"]["total"], 2);
    assert_eq!(stats["single"]["occupied"], 1);
    assert_eq!(stats["single"]["available"], 1);
    assert_eq!(stats["comfort"]["total"], 1);
    assert_eq!(stats["vip"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn form_options_list_vocabulary(pool: PgPool) {
    let token = common::admin_token(&pool).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/rooms/form-options",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/rooms/form-options",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let options = body_json(response).await;
    assert!(options["room_types"]
        .as_array()
        .unwrap()
        .contains(&json!("Deluxe")));
    assert_eq!(
        options["statuses"],
        json!(["available", "occupied", "maintenance", "cleaning"])
    );
    assert_eq!(options["categories"][2]["category"], "vip");
    assert!(options["categories"][2]["default_amenities"]
        .as_array()
        .unwrap()
        .contains(&json!("Jacuzzi")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_category(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let mut vip = room_body("Penthouse", 4, 500.0);
    vip["category"] = json!("vip");
    create_room(common::build_test_app(pool.clone()), &token, vip).await;
    create_room(
        common::build_test_app(pool.clone()),
        &token,
        room_body("Garden", 2, 90.0),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/rooms?category=vip").await).await;
    let rooms = json.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["name"], "Penthouse");
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn availability_needs_status_and_capacity(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = || common::build_test_app(pool.clone());

    create_room(app(), &token, room_body("Twin", 2, 80.0)).await;
    let family = create_room(app(), &token, room_body("Family", 3, 120.0)).await;
    let mut closed = room_body("Closed", 4, 150.0);
    closed["status"] = json!("maintenance");
    create_room(app(), &token, closed).await;

    let response = get(
        app(),
        "/api/v1/rooms/availability?checkIn=2024-03-01&checkOut=2024-03-03&adults=2&children=1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rooms = body_json(response).await;
    let ids: Vec<_> = rooms.as_array().unwrap().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![family["id"].clone()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn availability_rejects_bad_searches(pool: PgPool) {
    let app = || common::build_test_app(pool.clone());

    let response = get(
        app(),
        "/api/v1/rooms/availability?checkIn=2024-03-03&checkOut=2024-03-03&adults=2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Check-out date must be after check-in date"
    );

    let response = get(
        app(),
        "/api/v1/rooms/availability?checkIn=2024-03-01&checkOut=2024-03-03&adults=0",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "At least one adult is required"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undecodable_searches_use_error_body(pool: PgPool) {
    let app = || common::build_test_app(pool.clone());

    for uri in [
        "/api/v1/rooms/availability?adults=2",
        "/api/v1/rooms/availability?checkIn=soon&checkOut=2024-03-03&adults=2",
        "/api/v1/rooms/availability?checkIn=2024-03-01&checkOut=2024-03-03&adults=two",
        "/api/v1/rooms?category=penthouse",
    ] {
        let response = get(app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR", "{uri}");
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()), "{uri}");
    }

    let response = get(app(), "/api/v1/rooms/availability?adults=2").await;
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("checkIn"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_room_body_uses_error_body(pool: PgPool) {
    let token = common::admin_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/rooms",
        json!({ "name": "No price", "room_type": "Deluxe", "capacity": 2 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
