//! Room entity model and DTOs.

use hotelier_core::availability::Occupancy;
use hotelier_core::room::{RoomCategory, RoomStatus};
use hotelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A room row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub room_type: String,
    /// Price per night.
    pub price: f64,
    pub capacity: i32,
    #[sqlx(try_from = "String")]
    pub status: RoomStatus,
    #[sqlx(try_from = "String")]
    pub category: RoomCategory,
    pub room_number: String,
    pub amenities: Vec<String>,
    pub description: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Occupancy for Room {
    fn room_status(&self) -> RoomStatus {
        self.status
    }

    fn capacity(&self) -> i32 {
        self.capacity
    }
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    pub room_type: String,
    pub price: f64,
    pub capacity: i32,
    /// Defaults to `available` if omitted.
    pub status: Option<RoomStatus>,
    /// Defaults to `single` if omitted.
    pub category: Option<RoomCategory>,
    /// Filled from the category's numbering block if omitted.
    pub room_number: Option<String>,
    /// Filled from the category's default amenities if omitted.
    pub amenities: Option<Vec<String>>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing room. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub status: Option<RoomStatus>,
    pub category: Option<RoomCategory>,
    pub room_number: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
