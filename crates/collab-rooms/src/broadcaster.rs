//! Periodic reminder fan-out

use std::sync::Arc;
use std::time::Duration;

use shared_types::ServerMessage;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::manager::RoomManager;

pub const DEFAULT_ALERT_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_ALERT_MESSAGE: &str = "Smart alert: check upcoming deadlines in 60 days.";

#[derive(Debug, Clone)]
pub struct BroadcasterConfig {
    pub interval: Duration,
    pub message: String,
    /// Evict empty rooms idle for this long on each tick
    pub idle_ttl: Option<Duration>,
}

impl Default for BroadcasterConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_ALERT_INTERVAL,
            message: DEFAULT_ALERT_MESSAGE.to_string(),
            idle_ttl: None,
        }
    }
}

/// Send the reminder to every room once per interval, forever
///
/// The first round goes out immediately.
pub async fn run_alert_broadcaster(manager: Arc<RoomManager>, config: BroadcasterConfig) {
    info!(
        "Alert broadcaster running every {:?} (idle ttl {:?})",
        config.interval, config.idle_ttl
    );
    let alert = ServerMessage::alert(config.message);
    let mut ticker = time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Some(ttl) = config.idle_ttl {
            let evicted = manager.evict_idle_rooms(ttl).await;
            if evicted > 0 {
                debug!("Evicted {} idle room(s)", evicted);
            }
        }
        manager.broadcast_all(&alert).await;
    }
}
