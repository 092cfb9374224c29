use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use classroom_hub::Hub;
use classroom_store::Store;
use classroom_types::events::HubEvent;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub hub: Hub,
    /// Interval between heartbeat comments on `/events`. `None` sends none.
    pub keep_alive: Option<Duration>,
}

impl AppStateInner {
    pub fn new(store: Store, hub: Hub) -> Self {
        Self {
            store,
            hub,
            keep_alive: None,
        }
    }

    pub fn with_keep_alive(mut self, keep_alive: Option<Duration>) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Fan a committed mutation out to subscribers. Call only after the store lock is released.
    pub fn publish(&self, event: &HubEvent) {
        let delivery = self.hub.broadcast(event);
        debug!(
            "Broadcast {} to {} subscriber(s), {} dropped",
            event.kind(),
            delivery.delivered,
            delivery.dropped
        );
    }
}
