//! Hotel domain logic with no I/O.
//!
//! Everything here is pure so it can be shared by the repository layer, the
//! HTTP handlers, and tests without pulling in a database.

#[macro_use]
mod status;

pub mod availability;
pub mod booking;
pub mod error;
pub mod room;
pub mod room_number;
pub mod stay;
pub mod types;
