//! Internal PerishableQueue implementation with bounded capacity and TTL expiry
//!
//! This module provides the core queue functionality with:
//! - Fixed-capacity FIFO buffering with blocking admission and consumption
//! - A uniform time-to-live stamped on every item at its admission instant
//! - Expiry enforcement on the consume path and via explicit sweep passes
//! - Broadcast wakeups with a mandatory state recheck under the lock

use crate::core::sync::handle_mutex_poison;
use crate::core::time::TimeProvider;
use crate::queue::config::QueueConfig;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::gate::CapacityGate;
use crate::queue::item::{Item, DIRECT_PRODUCER_TAG};
use crate::queue::types::QueueStats;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Buffer contents and cumulative counters, guarded by one lock
#[derive(Debug)]
struct BufferState<T> {
    items: VecDeque<Item<T>>,
    total_enqueued: usize,
    total_delivered: usize,
    total_expired_on_take: usize,
    total_swept: usize,
}

impl<T> BufferState<T> {
    fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            total_enqueued: 0,
            total_delivered: 0,
            total_expired_on_take: 0,
            total_swept: 0,
        }
    }
}

/// Outcome of a single admission attempt
///
/// The payload travels back out on a full queue so the caller can retry
/// it after the next space wakeup.
enum Admission<T> {
    Admitted,
    Full(T),
}

/// PerishableQueue provides bounded FIFO buffering where every admitted
/// item is stamped with its admission instant and stops being deliverable
/// once its age reaches the queue-wide TTL
///
/// Expired items are never handed to a consumer: takes discard any dead
/// prefix before delivering, and sweep passes evict dead items whether or
/// not anyone is consuming. Occupancy counts whatever is physically
/// buffered, dead or alive, so a slot only frees when an item is removed.
#[derive(Debug)]
pub struct PerishableQueue<T> {
    /// FIFO buffer and counters
    state: Mutex<BufferState<T>>,

    /// Occupancy mirror, written under the lock, read without it
    size: AtomicUsize,

    /// Wakeups for blocked puts and takes
    gate: CapacityGate,

    /// Clock used to stamp admissions and evaluate ages
    clock: Arc<dyn TimeProvider>,

    /// Maximum number of buffered items
    capacity: usize,

    /// Uniform item lifetime
    ttl: Duration,
}

impl<T> PerishableQueue<T> {
    /// Create a new queue after validating the configuration
    pub fn new(config: QueueConfig, clock: Arc<dyn TimeProvider>) -> QueueResult<Self> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(BufferState::new(config.capacity)),
            size: AtomicUsize::new(0),
            gate: CapacityGate::new(),
            clock,
            capacity: config.capacity,
            ttl: config.ttl,
        })
    }

    /// Maximum number of items the queue will buffer
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Uniform lifetime applied to every admitted item
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current occupancy, dead items included
    ///
    /// Reads an atomic mirror, so it never contends with producers or
    /// consumers. The value is a snapshot and may be stale by the time
    /// the caller acts on it.
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Whether shutdown has begun
    pub fn is_closed(&self) -> bool {
        !self.gate.is_open()
    }

    /// Begin shutdown: reject new puts and release every blocked waiter
    ///
    /// Items already buffered stay takeable until drained or expired.
    pub fn close(&self) {
        self.gate.close();
    }

    /// Insert a payload, waiting as long as needed for a free slot
    pub async fn put(&self, payload: T) -> QueueResult<()> {
        self.put_tagged(payload, DIRECT_PRODUCER_TAG).await
    }

    /// Insert a payload on behalf of a named producer, waiting for a slot
    ///
    /// The admission timestamp is taken when a slot is actually granted,
    /// not when the call starts, so time spent blocked does not age the
    /// item.
    pub async fn put_tagged(&self, payload: T, producer_tag: &str) -> QueueResult<()> {
        let mut payload = payload;
        loop {
            // Arm the wakeup before inspecting state; a space broadcast
            // between the check and the await would otherwise be lost.
            let notified = self.gate.space_notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            payload = match self.admit(payload, producer_tag)? {
                Admission::Admitted => {
                    self.gate.signal_items();
                    return Ok(());
                }
                Admission::Full(payload) => payload,
            };

            notified.await;
        }
    }

    /// Insert with a deadline on the wait
    ///
    /// On expiry nothing has been admitted and queue state is untouched.
    pub async fn put_timeout(&self, payload: T, timeout: Duration) -> QueueResult<()> {
        self.put_tagged_timeout(payload, DIRECT_PRODUCER_TAG, timeout)
            .await
    }

    /// Insert on behalf of a named producer with a deadline on the wait
    pub async fn put_tagged_timeout(
        &self,
        payload: T,
        producer_tag: &str,
        timeout: Duration,
    ) -> QueueResult<()> {
        match tokio::time::timeout(timeout, self.put_tagged(payload, producer_tag)).await {
            Ok(result) => result,
            Err(_) => Err(QueueError::Timeout),
        }
    }

    /// Insert without waiting
    ///
    /// Fails with `Full` when no slot is free right now.
    pub fn try_put(&self, payload: T) -> QueueResult<()> {
        self.try_put_tagged(payload, DIRECT_PRODUCER_TAG)
    }

    /// Insert on behalf of a named producer without waiting
    pub fn try_put_tagged(&self, payload: T, producer_tag: &str) -> QueueResult<()> {
        match self.admit(payload, producer_tag)? {
            Admission::Admitted => {
                self.gate.signal_items();
                Ok(())
            }
            Admission::Full(_) => Err(QueueError::Full {
                capacity: self.capacity,
            }),
        }
    }

    /// Remove and return the oldest live item, waiting as long as needed
    ///
    /// Dead items at the head are discarded on the way and never
    /// delivered. After shutdown the remaining items can still be drained;
    /// once the buffer is exhausted this returns `Cancelled`.
    pub async fn take(&self) -> QueueResult<Item<T>> {
        loop {
            let notified = self.gate.items_notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(item) = self.collect()? {
                return Ok(item);
            }
            if self.is_closed() {
                return Err(QueueError::Cancelled);
            }

            notified.await;
        }
    }

    /// Remove the oldest live item, giving up once `timeout` elapses
    pub async fn take_timeout(&self, timeout: Duration) -> QueueResult<Item<T>> {
        match tokio::time::timeout(timeout, self.take()).await {
            Ok(result) => result,
            Err(_) => Err(QueueError::Timeout),
        }
    }

    /// Remove the oldest live item without waiting
    ///
    /// `Ok(None)` means nothing live is buffered right now. A closed and
    /// fully drained queue reports `Cancelled` instead, matching `take`.
    pub fn try_take(&self) -> QueueResult<Option<Item<T>>> {
        let item = self.collect()?;
        if item.is_none() && self.is_closed() {
            return Err(QueueError::Cancelled);
        }
        Ok(item)
    }

    /// Evict every expired item in one pass
    ///
    /// Admission order plus a uniform TTL mean dead items always form a
    /// prefix of the buffer, so the scan stops at the first live item.
    /// Returns the number of items evicted. Freed slots wake blocked
    /// producers.
    pub fn sweep_now(&self) -> QueueResult<usize> {
        let removed = {
            let mut state = self.lock_state()?;
            let now = self.clock.now();

            let mut removed = 0;
            while let Some(head) = state.items.front() {
                if head.is_alive(now, self.ttl) {
                    break;
                }
                state.items.pop_front();
                removed += 1;
            }
            state.total_swept += removed;
            self.size.store(state.items.len(), Ordering::Relaxed);
            removed
        };

        if removed > 0 {
            self.gate.signal_space();
        }
        Ok(removed)
    }

    /// Snapshot of occupancy and cumulative counters
    pub fn stats(&self) -> QueueResult<QueueStats> {
        let state = self.lock_state()?;
        Ok(QueueStats {
            size: state.items.len(),
            capacity: self.capacity,
            total_enqueued: state.total_enqueued,
            total_delivered: state.total_delivered,
            total_expired_on_take: state.total_expired_on_take,
            total_swept: state.total_swept,
        })
    }

    /// One admission attempt under the lock
    fn admit(&self, payload: T, producer_tag: &str) -> QueueResult<Admission<T>> {
        if self.is_closed() {
            return Err(QueueError::Cancelled);
        }

        let mut state = self.lock_state()?;
        if state.items.len() >= self.capacity {
            return Ok(Admission::Full(payload));
        }

        let item = Item::new(payload, self.clock.now(), producer_tag.to_string());
        state.items.push_back(item);
        state.total_enqueued += 1;
        self.size.store(state.items.len(), Ordering::Relaxed);
        Ok(Admission::Admitted)
    }

    /// One collection attempt under the lock
    ///
    /// Discards the dead prefix, then pops the oldest live item if any.
    /// Slots freed here wake blocked producers.
    fn collect(&self) -> QueueResult<Option<Item<T>>> {
        let (item, freed) = {
            let mut state = self.lock_state()?;
            let now = self.clock.now();

            let mut discarded = 0;
            while let Some(head) = state.items.front() {
                if head.is_alive(now, self.ttl) {
                    break;
                }
                state.items.pop_front();
                discarded += 1;
            }
            state.total_expired_on_take += discarded;

            let item = state.items.pop_front();
            if item.is_some() {
                state.total_delivered += 1;
            }
            self.size.store(state.items.len(), Ordering::Relaxed);

            let freed = discarded + usize::from(item.is_some());
            (item, freed)
        };

        if freed > 0 {
            self.gate.signal_space();
        }
        Ok(item)
    }

    fn lock_state(&self) -> QueueResult<MutexGuard<'_, BufferState<T>>> {
        handle_mutex_poison(self.state.lock(), |message| {
            log::error!("Queue state lock poisoned: {}", message);
            QueueError::Cancelled
        })
    }
}
