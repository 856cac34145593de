//! In-process domain events for the hotel backend.
//!
//! - [`EventBus`] is a publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`HotelEvent`] is the event envelope published by the API layer after
//!   a room or booking write commits.
//! - [`names`] lists the event type strings.

pub mod bus;
pub mod names;

pub use bus::{EventBus, HotelEvent};
