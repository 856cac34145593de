//! Repository for the `rooms` table.

use hotelier_core::room::{RoomCategory, RoomStatus};
use hotelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::{CreateRoom, Room, UpdateRoom};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, room_type, price, capacity, status, category, \
                                  room_number, amenities, description, image_url, \
                                  created_at, updated_at";

/// Provides CRUD operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    ///
    /// Missing `status` and `category` fall back to `available` and
    /// `single`; missing text and amenities are stored empty.
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms
                (name, room_type, price, capacity, status, category,
                 room_number, amenities, description, image_url)
             VALUES ($1, $2, $3, $4,
                     COALESCE($5, 'available'), COALESCE($6, 'single'),
                     COALESCE($7, ''), COALESCE($8, '{{}}'),
                     COALESCE($9, ''), COALESCE($10, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.name)
            .bind(&input.room_type)
            .bind(input.price)
            .bind(input.capacity)
            .bind(input.status.map(RoomStatus::as_str))
            .bind(input.category.map(RoomCategory::as_str))
            .bind(&input.room_number)
            .bind(&input.amenities)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a room by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List rooms, optionally restricted to one category.
    ///
    /// Ordered by category, then room number, then id.
    pub async fn list(
        pool: &PgPool,
        category: Option<RoomCategory>,
    ) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rooms
             WHERE ($1::text IS NULL OR category = $1)
             ORDER BY category, room_number, id"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(category.map(RoomCategory::as_str))
            .fetch_all(pool)
            .await
    }

    /// Non-blank room numbers currently used by rooms of `category`.
    pub async fn room_numbers_in_category(
        pool: &PgPool,
        category: RoomCategory,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT room_number FROM rooms
             WHERE category = $1 AND room_number <> ''
             ORDER BY room_number",
        )
        .bind(category.as_str())
        .fetch_all(pool)
        .await
    }

    /// Update a room. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                name = COALESCE($2, name),
                room_type = COALESCE($3, room_type),
                price = COALESCE($4, price),
                capacity = COALESCE($5, capacity),
                status = COALESCE($6, status),
                category = COALESCE($7, category),
                room_number = COALESCE($8, room_number),
                amenities = COALESCE($9, amenities),
                description = COALESCE($10, description),
                image_url = COALESCE($11, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.room_type)
            .bind(input.price)
            .bind(input.capacity)
            .bind(input.status.map(RoomStatus::as_str))
            .bind(input.category.map(RoomCategory::as_str))
            .bind(&input.room_number)
            .bind(&input.amenities)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Set a room's administrative status.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: RoomStatus,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("UPDATE rooms SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a room by ID. Returns `true` if a row was removed.
    ///
    /// Bookings that reference the room keep their snapshot.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
