//! Event type names. Dot-separated `<entity>.<action>`.

pub const BOOKING_CREATED: &str = "booking.created";
pub const BOOKING_STATUS_CHANGED: &str = "booking.status_changed";
pub const BOOKING_PAYMENT_CHANGED: &str = "booking.payment_changed";
pub const BOOKING_UPDATED: &str = "booking.updated";

pub const ROOM_CREATED: &str = "room.created";
pub const ROOM_UPDATED: &str = "room.updated";
pub const ROOM_DELETED: &str = "room.deleted";

/// Entity kinds used in [`HotelEvent::with_source`](crate::HotelEvent::with_source).
pub const ENTITY_BOOKING: &str = "booking";
pub const ENTITY_ROOM: &str = "room";
