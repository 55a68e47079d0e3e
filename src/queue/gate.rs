//! Capacity Gate
//!
//! Wakeup primitives for the two blocking conditions of a bounded
//! perishable queue: producers waiting for a free slot and consumers
//! waiting for an item. The gate never decides whether a condition
//! holds; it only wakes waiters so they can recheck queue state under
//! the lock. Slots are freed by takes and by background expiry sweeps,
//! so a woken waiter must never assume the state it was promised still
//! exists.
//!
//! Closing the gate is one-way. After `close()` every current and
//! future waiter observes the closed flag and bails out instead of
//! blocking again.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::futures::Notified;
use tokio::sync::Notify;

/// Broadcast wakeups for blocked queue operations
#[derive(Debug)]
pub(crate) struct CapacityGate {
    /// Woken when occupancy may have dropped below capacity
    space: Notify,
    /// Woken when an item may have been admitted
    items: Notify,
    /// Cleared once, on shutdown
    open: AtomicBool,
}

impl CapacityGate {
    pub(crate) fn new() -> Self {
        Self {
            space: Notify::new(),
            items: Notify::new(),
            open: AtomicBool::new(true),
        }
    }

    /// Whether the gate still admits waits
    pub(crate) fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Close the gate and release every blocked waiter on both sides
    ///
    /// Idempotent; later calls find the flag already cleared and the
    /// extra broadcasts are harmless.
    pub(crate) fn close(&self) {
        self.open.store(false, Ordering::Release);
        self.space.notify_waiters();
        self.items.notify_waiters();
    }

    /// Wake producers blocked on a full queue
    ///
    /// Broadcast rather than single-wake: a sweep can free several
    /// slots at once, and rechecking under the lock filters out any
    /// waiter that loses the race.
    pub(crate) fn signal_space(&self) {
        self.space.notify_waiters();
    }

    /// Wake consumers blocked on an empty queue
    pub(crate) fn signal_items(&self) {
        self.items.notify_waiters();
    }

    /// Future completed by the next space broadcast
    ///
    /// Callers must pin the future and call `enable()` on it before
    /// inspecting queue state, otherwise a broadcast between the check
    /// and the await is lost.
    pub(crate) fn space_notified(&self) -> Notified<'_> {
        self.space.notified()
    }

    /// Future completed by the next items broadcast
    pub(crate) fn items_notified(&self) -> Notified<'_> {
        self.items.notified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_gate_starts_open() {
        let gate = CapacityGate::new();
        assert!(gate.is_open());
    }

    #[test]
    fn test_close_is_one_way_and_idempotent() {
        let gate = CapacityGate::new();
        gate.close();
        assert!(!gate.is_open());
        gate.close();
        assert!(!gate.is_open());
    }

    #[tokio::test]
    async fn test_space_broadcast_wakes_enabled_waiter() {
        let gate = Arc::new(CapacityGate::new());

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                let notified = gate.space_notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                notified.await;
            })
        };

        // Give the waiter time to register before broadcasting
        tokio::time::sleep(Duration::from_millis(20)).await;
        gate.signal_space();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should be woken by the broadcast")
            .expect("waiter task should not panic");
    }

    #[tokio::test]
    async fn test_close_releases_waiters_on_both_sides() {
        let gate = Arc::new(CapacityGate::new());

        let producer_side = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                let notified = gate.space_notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                notified.await;
            })
        };
        let consumer_side = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                let notified = gate.items_notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                notified.await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        gate.close();

        tokio::time::timeout(Duration::from_secs(1), producer_side)
            .await
            .expect("producer waiter should be released by close")
            .expect("producer waiter should not panic");
        tokio::time::timeout(Duration::from_secs(1), consumer_side)
            .await
            .expect("consumer waiter should be released by close")
            .expect("consumer waiter should not panic");
    }
}
