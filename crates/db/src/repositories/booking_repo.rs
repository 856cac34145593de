//! Repository for the `bookings` table.
//!
//! Operations that also change room status run in a single transaction
//! with the booking write, so a booking and the rooms it holds never
//! disagree after a partial failure.

use hotelier_core::booking::{BookingStatus, PaymentStatus, INITIAL_BOOKING_STATUS, INITIAL_PAYMENT_STATUS};
use hotelier_core::room::RoomStatus;
use hotelier_core::stay;
use hotelier_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::booking::{
    Booking, BookingFilter, BookingStatusUpdate, NewBooking, RoomDetails, UpdateBookingDetails,
};
use crate::models::room::Room;
use crate::repositories::room_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_name, phone_number, email, gender, nationality, id_number, \
                       check_in_date, check_out_date, booking_date, adults, children, rooms, \
                       room_details, total_nights, total_amount, status, payment_status, \
                       special_requests, notes, created_at, updated_at";

/// Provides booking persistence and the booking lifecycle writes.
pub struct BookingRepo;

impl BookingRepo {
    /// Create a booking for `input.room_id` and mark that room occupied.
    ///
    /// Inside one transaction: lock the room row, snapshot it, price the
    /// stay from the snapshot, insert the booking as confirmed and unpaid,
    /// then set the room to `occupied`. Returns `None` (and writes nothing)
    /// if the room does not exist.
    ///
    /// There is no deduplication: the same input submitted twice creates
    /// two bookings.
    pub async fn create_with_room_hold(
        pool: &PgPool,
        input: &NewBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let room_query = format!(
            "SELECT {} FROM rooms WHERE id = $1 FOR UPDATE",
            room_repo::COLUMNS
        );
        let Some(room) = sqlx::query_as::<_, Room>(&room_query)
            .bind(input.room_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let details = RoomDetails::from(&room);
        let total_amount = stay::total_amount(room.price, input.total_nights);

        let insert = format!(
            "INSERT INTO bookings
                (customer_name, phone_number, email, gender, nationality, id_number,
                 check_in_date, check_out_date, adults, children, rooms, room_details,
                 total_nights, total_amount, status, payment_status, special_requests)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&insert)
            .bind(&input.customer_name)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.gender)
            .bind(&input.nationality)
            .bind(&input.id_number)
            .bind(input.check_in_date)
            .bind(input.check_out_date)
            .bind(input.adults)
            .bind(input.children)
            .bind(vec![room.id])
            .bind(Json(&details))
            .bind(input.total_nights)
            .bind(total_amount)
            .bind(INITIAL_BOOKING_STATUS.as_str())
            .bind(INITIAL_PAYMENT_STATUS.as_str())
            .bind(&input.special_requests)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(room.id)
            .bind(RoomStatus::Occupied.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Find a booking by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings matching `filter`, most recently booked first.
    pub async fn list(pool: &PgPool, filter: &BookingFilter) -> Result<Vec<Booking>, sqlx::Error> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);

        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::timestamptz IS NULL OR $3::timestamptz IS NULL
                    OR check_in_date BETWEEN $2 AND $3)
               AND ($4::text IS NULL
                    OR customer_name ILIKE $4
                    OR phone_number LIKE $4
                    OR email ILIKE $4
                    OR id_number LIKE $4)
             ORDER BY booking_date DESC, id DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(filter.status.map(BookingStatus::as_str))
            .bind(filter.from)
            .bind(filter.to)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Move a booking to `status`.
    ///
    /// When the move checks the booking out, every still-existing room in
    /// `rooms` is set back to `available` in the same transaction. Returns
    /// `None` if no booking with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Option<BookingStatusUpdate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Booking>(&lock)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let change = current.status.transition_to(status);

        let update = format!("UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let booking = sqlx::query_as::<_, Booking>(&update)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let released_rooms: Vec<DbId> = if change.releases_rooms() {
            sqlx::query_scalar("UPDATE rooms SET status = $2 WHERE id = ANY($1) RETURNING id")
                .bind(&current.rooms)
                .bind(RoomStatus::Available.as_str())
                .fetch_all(&mut *tx)
                .await?
        } else {
            Vec::new()
        };

        tx.commit().await?;

        if change.releases_rooms() {
            tracing::debug!(
                booking_id = id,
                released = released_rooms.len(),
                "Released rooms on checkout"
            );
        }

        Ok(Some(BookingStatusUpdate {
            booking,
            previous: change.from,
            released_rooms,
        }))
    }

    /// Set a booking's payment status. Stay status is left untouched.
    ///
    /// Returns `None` if no booking with the given `id` exists.
    pub async fn update_payment_status(
        pool: &PgPool,
        id: DbId,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query =
            format!("UPDATE bookings SET payment_status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(payment_status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Update the administrator-editable text fields.
    ///
    /// Returns `None` if no booking with the given `id` exists.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBookingDetails,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                notes = COALESCE($2, notes),
                special_requests = COALESCE($3, special_requests)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(&input.notes)
            .bind(&input.special_requests)
            .fetch_optional(pool)
            .await
    }
}

/// Build a `LIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// in the term taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(contains_pattern("smith"), "%smith%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
