//! Process-wide change notifications
//!
//! Multiple mounted views stay consistent by re-reading shared state when
//! notified. Events carry no payload: consumers must re-read the source of
//! truth, never assume an incremental diff.

use tokio::sync::broadcast;
use tracing::debug;

/// Zero-payload change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The server watchlist changed; views re-fetch and re-reconcile.
    WatchlistUpdated,
    /// The client-local favorites set changed; views re-read it.
    FavoritesUpdated,
}

/// In-process publish/subscribe channel for [`AppEvent`]
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        Self { tx }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: AppEvent) {
        debug!(?event, "emitting app event");
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
