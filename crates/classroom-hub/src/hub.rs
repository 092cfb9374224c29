use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::subscription::{SubscriberId, Subscription};

/// Queue length per subscriber.
pub const DEFAULT_CAPACITY: usize = 8;

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub dropped: usize,
}

/// Registry of active subscribers. Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

struct HubInner {
    capacity: usize,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<Arc<str>>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity of zero is bumped to one; tokio channels need room for at least one message.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                capacity: capacity.max(1),
                subscribers: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    // Senders are only ever inserted or removed whole, so a poisoned map is still consistent.
    fn subscribers(&self) -> MutexGuard<'_, HashMap<SubscriberId, mpsc::Sender<Arc<str>>>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new bounded delivery queue.
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId::new();
        let (tx, rx) = mpsc::channel(self.inner.capacity);

        let count = {
            let mut subscribers = self.subscribers();
            subscribers.insert(id, tx);
            subscribers.len()
        };
        debug!("Subscriber {} registered ({} active)", id, count);

        Subscription::new(id, rx, self.clone())
    }

    /// Remove a subscriber and close its queue. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let (removed, count) = {
            let mut subscribers = self.subscribers();
            let removed = subscribers.remove(&id);
            (removed, subscribers.len())
        };

        // Dropping the last sender closes the channel.
        match removed {
            Some(_) => {
                debug!("Subscriber {} removed ({} active)", id, count);
                true
            }
            None => false,
        }
    }

    /// Serialize `event` once, then offer it to every subscriber without blocking.
    pub fn broadcast<E: Serialize>(&self, event: &E) -> Delivery {
        let json: Arc<str> = match serde_json::to_string(event) {
            Ok(json) => json.into(),
            Err(e) => {
                error!("Failed to serialize hub event: {}", e);
                return Delivery::default();
            }
        };

        let mut delivery = Delivery::default();
        let subscribers = self.subscribers();
        for (id, tx) in subscribers.iter() {
            match tx.try_send(json.clone()) {
                Ok(()) => delivery.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!("Subscriber {} queue full, dropping event", id);
                    delivery.dropped += 1;
                }
                // Receiver is gone but its guard hasn't unregistered yet.
                Err(TrySendError::Closed(_)) => delivery.dropped += 1,
            }
        }

        delivery
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }

    /// Drop every subscriber queue, ending all open streams. Used on shutdown.
    pub fn close_all(&self) -> usize {
        let drained: Vec<_> = self.subscribers().drain().collect();
        if !drained.is_empty() {
            debug!("Closed {} subscriber queue(s)", drained.len());
        }
        drained.len()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use classroom_types::events::HubEvent;
    use classroom_types::models::Announcement;

    use super::*;

    fn announcement(n: usize) -> HubEvent {
        HubEvent::Announcement(Announcement {
            id: n.to_string(),
            message: format!("message {}", n),
            at: Utc::now(),
        })
    }

    #[test]
    fn broadcast_without_subscribers_is_a_no_op() {
        let hub = Hub::new();
        assert_eq!(hub.broadcast(&announcement(0)), Delivery::default());
    }

    #[test]
    fn every_subscriber_gets_the_same_frame() {
        let hub = Hub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        let delivery = hub.broadcast(&announcement(1));
        assert_eq!(delivery.delivered, 2);

        let from_a = a.try_recv().unwrap();
        let from_b = b.try_recv().unwrap();
        assert_eq!(from_a, from_b);

        let value: serde_json::Value = serde_json::from_str(&from_a).unwrap();
        assert_eq!(value["type"], "announcement");
        assert_eq!(value["payload"]["message"], "message 1");
    }

    #[test]
    fn stalled_subscriber_does_not_affect_others() {
        let hub = Hub::new();
        let mut draining = hub.subscribe();
        let mut stalled = hub.subscribe();

        let mut received = Vec::new();
        for n in 0..20 {
            hub.broadcast(&announcement(n));
            received.push(draining.try_recv().unwrap());
        }
        assert_eq!(received.len(), 20);

        let mut buffered = 0;
        while stalled.try_recv().is_some() {
            buffered += 1;
        }
        assert_eq!(buffered, DEFAULT_CAPACITY);
    }

    #[test]
    fn full_queue_reports_drops() {
        let hub = Hub::with_capacity(2);
        let _stalled = hub.subscribe();

        for n in 0..2 {
            assert_eq!(hub.broadcast(&announcement(n)).delivered, 1);
        }
        let delivery = hub.broadcast(&announcement(2));
        assert_eq!(delivery, Delivery { delivered: 0, dropped: 1 });
    }

    #[test]
    fn messages_keep_broadcast_order() {
        let hub = Hub::new();
        let mut sub = hub.subscribe();
        for n in 0..5 {
            hub.broadcast(&announcement(n));
        }
        for n in 0..5 {
            let value: serde_json::Value = serde_json::from_str(&sub.try_recv().unwrap()).unwrap();
            assert_eq!(value["payload"]["id"], n.to_string());
        }
    }

    #[test]
    fn dropping_a_subscription_unregisters_it() {
        let hub = Hub::new();
        let sub = hub.subscribe();
        let other = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 1);

        other.close();
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let hub = Hub::new();
        let sub = hub.subscribe();
        let id = sub.id();

        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn unsubscribe_closes_the_queue() {
        let hub = Hub::new();
        let mut sub = hub.subscribe();
        hub.broadcast(&announcement(7));

        hub.unsubscribe(sub.id());

        // Buffered messages drain before the closed queue reports the end.
        assert!(sub.recv().await.is_some());
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn close_all_ends_every_stream() {
        let hub = Hub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.close_all(), 2);
        assert!(a.recv().await.is_none());
        assert!(b.recv().await.is_none());
        assert_eq!(hub.subscriber_count(), 0);
    }
}
