//! In-process fan-out of JSON-encoded events to push-stream subscribers.
//!
//! Every subscriber owns a bounded queue. A broadcast serializes the event
//! once and offers it to each queue without waiting; a full queue drops the
//! event for that subscriber only, so a stalled reader never holds up the
//! producer or any other subscriber.

pub mod hub;
pub mod subscription;

pub use hub::{DEFAULT_CAPACITY, Delivery, Hub};
pub use subscription::{SubscriberId, Subscription};
