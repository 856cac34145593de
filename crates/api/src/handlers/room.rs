//! Handlers for the `/rooms` resource.
//!
//! Listing, fetching and availability search are public. Everything that
//! writes, plus the number suggestion and the stats, needs an
//! administrator token.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hotelier_core::availability::{self, AvailabilityQuery};
use hotelier_core::error::CoreError;
use hotelier_core::room::{self, CategoryStats, RoomCategory, RoomStatus};
use hotelier_core::room_number::suggest_room_number;
use hotelier_core::types::DbId;
use hotelier_db::models::room::{CreateRoom, Room, UpdateRoom};
use hotelier_db::repositories::RoomRepo;
use hotelier_events::{names, HotelEvent};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::{CategoryParams, StayParams};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub category: RoomCategory,
}

#[derive(Debug, Serialize)]
pub struct SuggestedNumber {
    pub category: RoomCategory,
    pub room_number: String,
}

/// Choices offered by the add-room and edit-room forms.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub room_types: &'static [&'static str],
    pub amenities: &'static [&'static str],
    pub statuses: &'static [RoomStatus],
    pub categories: Vec<CategoryOption>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub category: RoomCategory,
    pub default_amenities: &'static [&'static str],
}

/// GET /api/v1/rooms?category=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<Json<Vec<Room>>> {
    let rooms = RoomRepo::list(&state.pool, params.category).await?;
    Ok(Json(rooms))
}

/// GET /api/v1/rooms/availability?checkIn=&checkOut=&adults=&children=
///
/// Rooms whose status is `available` and whose capacity holds the whole
/// party. Existing bookings for the same dates are not consulted.
pub async fn availability(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StayParams>,
) -> AppResult<Json<Vec<Room>>> {
    let query = AvailabilityQuery::from(&params);
    query.validate()?;

    let rooms = RoomRepo::list(&state.pool, None).await?;
    let matches = availability::filter_available(rooms, &query);
    tracing::debug!(
        guests = query.guests(),
        matches = matches.len(),
        "Availability search"
    );
    Ok(Json(matches))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Room>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Room", id))?;
    Ok(Json(room))
}

/// POST /api/v1/rooms
///
/// A missing room number is filled from the category's block; missing
/// amenities default to the category's standard set.
pub async fn create(
    State(state): State<AppState>,
    admin: AuthUser,
    AppJson(mut input): AppJson<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    room::validate_required_text("Room name", &input.name)?;
    room::validate_required_text("Room type", &input.room_type)?;
    room::validate_price(input.price)?;
    room::validate_capacity(input.capacity)?;

    let category = input.category.unwrap_or_default();
    input.category = Some(category);
    input.name = input.name.trim().to_string();
    input.room_type = input.room_type.trim().to_string();

    let number = input.room_number.as_deref().map(str::trim).unwrap_or("");
    input.room_number = if number.is_empty() {
        let existing = RoomRepo::room_numbers_in_category(&state.pool, category).await?;
        Some(suggest_room_number(category, &existing))
    } else {
        Some(number.to_string())
    };

    input.amenities = Some(match input.amenities.take() {
        Some(list) => room::normalize_amenities(list),
        None => room::normalize_amenities(category.default_amenities()),
    });

    let room = RoomRepo::create(&state.pool, &input).await?;
    tracing::info!(room_id = room.id, room_number = %room.room_number, "Room created");

    state.event_bus.publish(
        HotelEvent::new(names::ROOM_CREATED)
            .with_source(names::ENTITY_ROOM, room.id)
            .with_actor(admin.user_id)
            .with_payload(&json!({
                "room_number": room.room_number,
                "category": room.category,
                "status": room.status,
            })),
    );

    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/v1/rooms/{id}
///
/// Only fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<UpdateRoom>,
) -> AppResult<Json<Room>> {
    validate_room_patch(&input)?;
    input.name = input.name.map(|n| n.trim().to_string());
    input.room_type = input.room_type.map(|t| t.trim().to_string());
    input.room_number = input.room_number.map(|n| n.trim().to_string());
    input.amenities = input.amenities.map(room::normalize_amenities);

    // A cleared number is re-suggested the same way create fills it.
    if input.room_number.as_deref() == Some("") {
        let current = RoomRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::not_found("Room", id))?;
        let category = input.category.unwrap_or(current.category);
        let existing = RoomRepo::room_numbers_in_category(&state.pool, category).await?;
        let others = existing.iter().filter(|n| **n != current.room_number);
        input.room_number = Some(suggest_room_number(category, others));
    }

    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Room", id))?;

    state.event_bus.publish(
        HotelEvent::new(names::ROOM_UPDATED)
            .with_source(names::ENTITY_ROOM, room.id)
            .with_actor(admin.user_id)
            .with_payload(&json!({ "status": room.status })),
    );

    Ok(Json(room))
}

/// DELETE /api/v1/rooms/{id}
///
/// Bookings that held the room keep their snapshot.
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RoomRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Room", id));
    }
    tracing::info!(room_id = id, user_id = admin.user_id, "Room deleted");

    state.event_bus.publish(
        HotelEvent::new(names::ROOM_DELETED)
            .with_source(names::ENTITY_ROOM, id)
            .with_actor(admin.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/rooms/suggest-number?category=
pub async fn suggest_number(
    State(state): State<AppState>,
    _admin: AuthUser,
    AppQuery(params): AppQuery<SuggestParams>,
) -> AppResult<Json<SuggestedNumber>> {
    let existing = RoomRepo::room_numbers_in_category(&state.pool, params.category).await?;
    Ok(Json(SuggestedNumber {
        category: params.category,
        room_number: suggest_room_number(params.category, &existing),
    }))
}

/// GET /api/v1/rooms/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: AuthUser,
) -> AppResult<Json<CategoryStats>> {
    let rooms = RoomRepo::list(&state.pool, None).await?;
    let stats = CategoryStats::tally(rooms.iter().map(|r| (r.category, r.status)));
    Ok(Json(stats))
}

/// GET /api/v1/rooms/form-options
pub async fn form_options(_admin: AuthUser) -> Json<FormOptions> {
    Json(FormOptions {
        room_types: room::ROOM_TYPES,
        amenities: room::AVAILABLE_AMENITIES,
        statuses: RoomStatus::ALL,
        categories: RoomCategory::ALL
            .iter()
            .map(|&category| CategoryOption {
                category,
                default_amenities: category.default_amenities(),
            })
            .collect(),
    })
}

fn validate_room_patch(input: &UpdateRoom) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        room::validate_required_text("Room name", name)?;
    }
    if let Some(room_type) = &input.room_type {
        room::validate_required_text("Room type", room_type)?;
    }
    if let Some(price) = input.price {
        room::validate_price(price)?;
    }
    if let Some(capacity) = input.capacity {
        room::validate_capacity(capacity)?;
    }
    Ok(())
}
