//! Handlers for the `/bookings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hotelier_core::availability::AvailabilityQuery;
use hotelier_core::booking::{BookingRequest, BookingStatus, PaymentStatus};
use hotelier_core::stay::{self, StayQuote};
use hotelier_core::types::{DbId, Timestamp};
use hotelier_db::models::booking::{
    Booking, BookingFilter, NewBooking, RoomDetails, UpdateBookingDetails,
};
use hotelier_db::repositories::{BookingRepo, RoomRepo};
use hotelier_events::{names, HotelEvent};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::{BookingListParams, QuoteParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Price preview shown on the booking form before submission.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub room: RoomDetails,
    pub check_in: Timestamp,
    pub check_out: Timestamp,
    pub adults: i32,
    pub children: i32,
    pub total_nights: i32,
    pub total_amount: f64,
}

/// Body of `PUT /bookings/{id}/status`. Parsed by hand so an unknown value
/// is a validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub payment_status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub previous_status: BookingStatus,
    /// Rooms set back to `available` by this change.
    pub released_rooms: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Guest-facing handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings/quote?roomId=&checkIn=&checkOut=&adults=&children=
pub async fn quote(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<QuoteParams>,
) -> AppResult<Json<QuoteResponse>> {
    AvailabilityQuery::from(&params).validate()?;

    let room = RoomRepo::find_by_id(&state.pool, params.room_id)
        .await?
        .ok_or(AppError::not_found("Room", params.room_id))?;

    let quote = StayQuote::compute(room.price, params.check_in, params.check_out)?;

    Ok(Json(QuoteResponse {
        room: RoomDetails::from(&room),
        check_in: params.check_in,
        check_out: params.check_out,
        adults: params.adults,
        children: params.children,
        total_nights: quote.total_nights,
        total_amount: quote.total_amount,
    }))
}

/// POST /api/v1/bookings
///
/// Creates a confirmed, unpaid booking and marks the room occupied. The
/// same form submitted twice creates two bookings.
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<BookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    input.email = BookingRequest::non_blank(&input.email);
    input.check()?;

    let new_booking = NewBooking {
        room_id: input.room_id,
        customer_name: input.customer_name.trim().to_string(),
        phone_number: input.phone_number.trim().to_string(),
        email: input.email.clone(),
        gender: BookingRequest::non_blank(&input.gender),
        nationality: BookingRequest::non_blank(&input.nationality),
        id_number: BookingRequest::non_blank(&input.id_number),
        special_requests: BookingRequest::non_blank(&input.special_requests),
        check_in_date: input.check_in_date,
        check_out_date: input.check_out_date,
        adults: input.adults,
        children: input.children,
        total_nights: stay::total_nights(input.check_in_date, input.check_out_date),
    };

    let booking = BookingRepo::create_with_room_hold(&state.pool, &new_booking)
        .await?
        .ok_or(AppError::not_found("Room", input.room_id))?;

    tracing::info!(
        booking_id = booking.id,
        room_id = input.room_id,
        total_nights = booking.total_nights,
        "Booking created"
    );

    state.event_bus.publish(
        HotelEvent::new(names::BOOKING_CREATED)
            .with_source(names::ENTITY_BOOKING, booking.id)
            .with_payload(&json!({
                "rooms": booking.rooms,
                "status": booking.status,
                "check_in_date": booking.check_in_date,
                "check_out_date": booking.check_out_date,
            })),
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/v1/bookings/{id}
///
/// The confirmation page reads the booking back by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Booking", id))?;
    Ok(Json(booking))
}

// ---------------------------------------------------------------------------
// Administrator handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings?status=&from=&to=&search=
pub async fn list(
    State(state): State<AppState>,
    _admin: AuthUser,
    AppQuery(params): AppQuery<BookingListParams>,
) -> AppResult<Json<Vec<Booking>>> {
    let filter = BookingFilter {
        status: params.status,
        from: params.from,
        to: params.to,
        search: params.search,
    };
    let bookings = BookingRepo::list(&state.pool, &filter).await?;
    Ok(Json(bookings))
}

/// PATCH /api/v1/bookings/{id}
pub async fn update_details(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateBookingDetails>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::update_details(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Booking", id))?;

    state.event_bus.publish(
        HotelEvent::new(names::BOOKING_UPDATED)
            .with_source(names::ENTITY_BOOKING, id)
            .with_actor(admin.user_id),
    );

    Ok(Json(booking))
}

/// PUT /api/v1/bookings/{id}/status
///
/// Any status may follow any other. Moving into `checked-out` releases the
/// booking's rooms.
pub async fn update_status(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<StatusRequest>,
) -> AppResult<Json<StatusChangeResponse>> {
    let status: BookingStatus = input.status.trim().parse()?;

    let update = BookingRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::not_found("Booking", id))?;

    tracing::info!(
        booking_id = id,
        from = %update.previous,
        to = %status,
        released = update.released_rooms.len(),
        "Booking status changed"
    );

    state.event_bus.publish(
        HotelEvent::new(names::BOOKING_STATUS_CHANGED)
            .with_source(names::ENTITY_BOOKING, id)
            .with_actor(admin.user_id)
            .with_payload(&json!({
                "from": update.previous,
                "to": status,
                "released_rooms": update.released_rooms,
            })),
    );

    Ok(Json(StatusChangeResponse {
        booking: update.booking,
        previous_status: update.previous,
        released_rooms: update.released_rooms,
    }))
}

/// PUT /api/v1/bookings/{id}/payment-status
pub async fn update_payment_status(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<PaymentStatusRequest>,
) -> AppResult<Json<Booking>> {
    let payment_status: PaymentStatus = input.payment_status.trim().parse()?;

    let booking = BookingRepo::update_payment_status(&state.pool, id, payment_status)
        .await?
        .ok_or(AppError::not_found("Booking", id))?;

    state.event_bus.publish(
        HotelEvent::new(names::BOOKING_PAYMENT_CHANGED)
            .with_source(names::ENTITY_BOOKING, id)
            .with_actor(admin.user_id)
            .with_payload(&json!({ "payment_status": payment_status })),
    );

    Ok(Json(booking))
}
