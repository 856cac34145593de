//! Forwarding of domain events to connected dashboards.

pub mod notifier;

pub use notifier::EventNotifier;
