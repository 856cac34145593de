//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.
//! Publishing never blocks and never fails: events sent while nobody is
//! subscribed are dropped.

use chrono::{DateTime, Utc};
use hotelier_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// HotelEvent
// ---------------------------------------------------------------------------

/// Something that happened to a room or booking.
///
/// Built with [`HotelEvent::new`] and the `with_*` builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelEvent {
    /// Dot-separated event name, see [`crate::names`].
    pub event_type: String,

    /// Entity kind the event is about (`"room"` or `"booking"`).
    pub source_entity_type: Option<String>,

    pub source_entity_id: Option<DbId>,

    /// Administrator that caused the event. `None` for guest actions.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl HotelEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the payload from any serializable value.
    ///
    /// A value that fails to serialize leaves the payload empty and is
    /// logged; events are best-effort.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => self.payload = value,
            Err(e) => {
                tracing::warn!(error = %e, event_type = %self.event_type, "Event payload not serializable");
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out event bus.
///
/// Every subscriber independently receives every event published after it
/// subscribed. Slow subscribers observe `RecvError::Lagged` once the
/// buffer overflows.
pub struct EventBus {
    sender: broadcast::Sender<HotelEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: HotelEvent) {
        tracing::debug!(
            event_type = %event.event_type,
            entity_id = ?event.source_entity_id,
            "Publishing event"
        );
        // A send error only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HotelEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;

    #[tokio::test]
    async fn subscriber_receives_enriched_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = HotelEvent::new(names::BOOKING_CREATED)
            .with_source(names::ENTITY_BOOKING, 42)
            .with_actor(7)
            .with_payload(&serde_json::json!({"room_id": 3}));
        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "booking.created");
        assert_eq!(received.source_entity_type.as_deref(), Some("booking"));
        assert_eq!(received.source_entity_id, Some(42));
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.payload["room_id"], 3);
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(HotelEvent::new(names::ROOM_DELETED));

        assert_eq!(rx1.recv().await.unwrap().event_type, "room.deleted");
        assert_eq!(rx2.recv().await.unwrap().event_type, "room.deleted");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(HotelEvent::new(names::ROOM_CREATED));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn slow_subscriber_lags() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for _ in 0..3 {
            bus.publish(HotelEvent::new(names::BOOKING_UPDATED));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
    }

    #[test]
    fn bare_event_has_empty_payload() {
        let event = HotelEvent::new(names::BOOKING_PAYMENT_CHANGED);
        assert!(event.source_entity_type.is_none());
        assert!(event.actor_user_id.is_none());
        assert!(event.payload.is_object());
    }
}
