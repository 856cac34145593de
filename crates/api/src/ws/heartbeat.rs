use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Seconds between dashboard pings.
const DASHBOARD_PING_SECS: u64 = 30;

/// Ping every open dashboard on a fixed period until the handle is aborted.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(DASHBOARD_PING_SECS));
        loop {
            ticker.tick().await;
            let dashboards = ws_manager.connection_count().await;
            if dashboards > 0 {
                tracing::debug!(dashboards, "Pinging dashboards");
                ws_manager.ping_all().await;
            }
        }
    })
}
