//! Event-to-WebSocket forwarding.
//!
//! [`EventNotifier`] subscribes to the event bus and pushes each event to
//! every connected socket as a JSON text frame. Delivery is best-effort:
//! a notifier that falls behind skips events and logs how many.

use std::sync::Arc;

use axum::extract::ws::Message;
use hotelier_events::HotelEvent;
use serde_json::json;
use tokio::sync::broadcast;

use crate::ws::WsManager;

pub struct EventNotifier {
    ws_manager: Arc<WsManager>,
}

impl EventNotifier {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Forward events until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<HotelEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let delivered = self.ws_manager.broadcast(render(&event)).await;
                    tracing::debug!(
                        event_type = %event.event_type,
                        delivered,
                        "Event forwarded to dashboards"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event notifier lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notifier shutting down");
                    break;
                }
            }
        }
    }
}

/// The frame sent to dashboards for one event.
pub fn render(event: &HotelEvent) -> Message {
    let body = json!({
        "type": "event",
        "event_type": event.event_type,
        "entity_type": event.source_entity_type,
        "entity_id": event.source_entity_id,
        "payload": event.payload,
        "timestamp": event.timestamp,
    });
    Message::Text(body.to_string().into())
}

#[cfg(test)]
mod tests {
    use hotelier_events::{names, EventBus};

    use super::*;

    #[test]
    fn frame_carries_event_fields() {
        let event = HotelEvent::new(names::BOOKING_STATUS_CHANGED)
            .with_source(names::ENTITY_BOOKING, 9)
            .with_payload(&json!({"to": "checked-out"}));

        let Message::Text(text) = render(&event) else {
            panic!("expected a text frame");
        };
        let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["event_type"], "booking.status_changed");
        assert_eq!(value["entity_type"], "booking");
        assert_eq!(value["entity_id"], 9);
        assert_eq!(value["payload"]["to"], "checked-out");
    }

    #[tokio::test]
    async fn notifier_forwards_then_stops_when_bus_drops() {
        let ws_manager = Arc::new(WsManager::new());
        let mut socket = ws_manager.add("dash".to_string()).await;

        let bus = EventBus::default();
        let handle = tokio::spawn(EventNotifier::new(Arc::clone(&ws_manager)).run(bus.subscribe()));

        bus.publish(HotelEvent::new(names::ROOM_CREATED).with_source(names::ENTITY_ROOM, 1));
        match socket.recv().await {
            Some(Message::Text(text)) => assert!(text.as_str().contains("room.created")),
            other => panic!("unexpected message: {other:?}"),
        }

        drop(bus);
        handle.await.unwrap();
    }
}
