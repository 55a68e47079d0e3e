//! Item model for the perishable queue
//!
//! An [`Item`] wraps an application payload together with the metadata the
//! queue needs to age it out: the monotonic instant at which it was admitted
//! and a producer tag for diagnostics. Payloads are opaque to the queue; the
//! queue owns every item exclusively between admission and removal, and
//! ownership moves to the caller on delivery.

use std::time::{Duration, Instant};

/// Producer tag used for items admitted directly through the queue,
/// without going through a [`QueueProducer`](crate::queue::QueueProducer) handle.
pub const DIRECT_PRODUCER_TAG: &str = "direct";

/// A payload admitted to the queue, stamped with its admission instant
///
/// `created_at` is fixed when the item enters the queue and never mutated;
/// liveness is a pure function of that instant, the current time and the
/// queue's TTL.
#[derive(Debug, Clone)]
pub struct Item<T> {
    payload: T,
    created_at: Instant,
    producer_tag: String,
}

impl<T> Item<T> {
    pub(crate) fn new(payload: T, created_at: Instant, producer_tag: String) -> Self {
        Self {
            payload,
            created_at,
            producer_tag,
        }
    }

    /// Borrow the payload without removing it from the item
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the item and take ownership of the payload
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// The monotonic instant at which this item was admitted
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Tag identifying the producing side (diagnostics only)
    pub fn producer_tag(&self) -> &str {
        &self.producer_tag
    }

    /// Time elapsed since admission, as seen at `now`
    ///
    /// Saturates to zero if `now` is somehow earlier than the admission
    /// instant, so age never underflows.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// Whether this item is still alive at `now` under the given TTL
    ///
    /// Pure predicate: `age(now) < ttl`. No hidden state.
    pub fn is_alive(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_alive_within_ttl() {
        let admitted = Instant::now();
        let item = Item::new("payload", admitted, "test".to_string());
        let ttl = Duration::from_millis(100);

        assert!(item.is_alive(admitted, ttl));
        assert!(item.is_alive(admitted + Duration::from_millis(99), ttl));
    }

    #[test]
    fn test_item_dead_at_exact_ttl() {
        let admitted = Instant::now();
        let item = Item::new("payload", admitted, "test".to_string());
        let ttl = Duration::from_millis(100);

        // age == ttl is already dead, only age < ttl is alive
        assert!(!item.is_alive(admitted + ttl, ttl));
        assert!(!item.is_alive(admitted + Duration::from_millis(101), ttl));
    }

    #[test]
    fn test_item_age_saturates_before_admission() {
        let now = Instant::now();
        let item = Item::new("payload", now + Duration::from_millis(50), "test".to_string());

        assert_eq!(item.age(now), Duration::ZERO);
        assert!(item.is_alive(now, Duration::from_millis(1)));
    }

    #[test]
    fn test_item_accessors() {
        let admitted = Instant::now();
        let item = Item::new(42u32, admitted, "tagged".to_string());

        assert_eq!(*item.payload(), 42);
        assert_eq!(item.created_at(), admitted);
        assert_eq!(item.producer_tag(), "tagged");
        assert_eq!(item.into_payload(), 42);
    }
}
