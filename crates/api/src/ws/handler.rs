use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// GET /ws
///
/// Front-desk dashboards subscribe here to the live feed of room and
/// booking events.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_dashboard(socket, state.ws_manager))
}

async fn serve_dashboard(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let dashboard_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(dashboard_id = %dashboard_id, "Dashboard subscribed");

    let mut outbound = ws_manager.add(dashboard_id.clone()).await;
    let (mut sink, mut inbound) = socket.split();

    let forward_id = dashboard_id.clone();
    let forward = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            if sink.send(event).await.is_err() {
                tracing::debug!(dashboard_id = %forward_id, "Dashboard went away mid-send");
                break;
            }
        }
    });

    // Dashboards only listen; anything they send other than Close is dropped.
    while let Some(frame) = inbound.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(dashboard_id = %dashboard_id, error = %e, "Dashboard socket error");
                break;
            }
        }
    }

    ws_manager.remove(&dashboard_id).await;
    forward.abort();
    tracing::info!(dashboard_id = %dashboard_id, "Dashboard unsubscribed");
}
