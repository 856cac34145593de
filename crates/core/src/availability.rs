//! Availability search over the room inventory.
//!
//! The search consults only each room's administrative status and its
//! capacity. It does not look at existing bookings, so a room marked
//! `available` that already has a future booking for the same dates is
//! still returned.

use crate::error::CoreError;
use crate::room::RoomStatus;
use crate::stay::validate_stay;
use crate::types::Timestamp;

/// Anything the availability filter can inspect.
pub trait Occupancy {
    fn room_status(&self) -> RoomStatus;
    fn capacity(&self) -> i32;
}

/// A guest's search: stay dates and party size.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityQuery {
    pub check_in: Timestamp,
    pub check_out: Timestamp,
    pub adults: i32,
    pub children: i32,
}

impl AvailabilityQuery {
    /// Reject bad dates and party sizes before any room is looked at.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_stay(self.check_in, self.check_out)?;
        if self.adults < 1 {
            return Err(CoreError::Validation(
                "At least one adult is required".to_string(),
            ));
        }
        if self.children < 0 {
            return Err(CoreError::Validation(
                "Children cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Total number of occupants the room must hold.
    pub fn guests(&self) -> i32 {
        self.adults.saturating_add(self.children)
    }

    /// Whether a single room satisfies this query.
    pub fn admits<R: Occupancy + ?Sized>(&self, room: &R) -> bool {
        room.room_status() == RoomStatus::Available && room.capacity() >= self.guests()
    }
}

/// Keep the rooms that are available and large enough for the party.
///
/// Assumes `query` has already been validated with
/// [`AvailabilityQuery::validate`].
pub fn filter_available<R, I>(rooms: I, query: &AvailabilityQuery) -> Vec<R>
where
    R: Occupancy,
    I: IntoIterator<Item = R>,
{
    rooms.into_iter().filter(|room| query.admits(room)).collect()
}
