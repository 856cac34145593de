//! Booking entity model and DTOs.

use hotelier_core::booking::{BookingStatus, PaymentStatus};
use hotelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::room::Room;

/// Frozen copy of the booked room taken when the booking is created.
///
/// Later edits to the room (or its deletion) do not change it, so the
/// booking's price and display data stay as the guest saw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetails {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

impl From<&Room> for RoomDetails {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            price: room.price,
            image_url: room.image_url.clone(),
        }
    }
}

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub customer_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub booking_date: Timestamp,
    pub adults: i32,
    pub children: i32,
    pub rooms: Vec<DbId>,
    pub room_details: Json<RoomDetails>,
    pub total_nights: i32,
    pub total_amount: f64,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO built from a checked guest request.
///
/// The room snapshot and total amount are not part of it: they are taken
/// from the room row inside the creating transaction.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: DbId,
    pub customer_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub special_requests: Option<String>,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub adults: i32,
    pub children: i32,
    pub total_nights: i32,
}

/// DTO for the administrator's booking edit. Only free-text fields are editable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingDetails {
    pub notes: Option<String>,
    pub special_requests: Option<String>,
}

/// Dashboard list filter. Every field is optional.
///
/// The check-in range applies only when both `from` and `to` are given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    /// Matched against name and email (case-insensitive) and phone and
    /// id number (exact substring).
    pub search: Option<String>,
}

/// Result of a stay-status update.
#[derive(Debug, Clone)]
pub struct BookingStatusUpdate {
    pub booking: Booking,
    pub previous: BookingStatus,
    /// Rooms set back to `available` by this update (empty unless it
    /// checked the booking out).
    pub released_rooms: Vec<DbId>,
}
