//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod room_repo;
pub mod session_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use room_repo::RoomRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
