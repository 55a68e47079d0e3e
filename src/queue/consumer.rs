//! Queue Consumer for taking live items
//!
//! Consumers remove items from the shared queue in admission order.
//! Expired items are discarded on the way out and never delivered, so a
//! consumer only ever sees payloads younger than the queue's TTL. The
//! handle holds a weak reference to the manager and reports `Cancelled`
//! once the manager is gone.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::PerishableQueue;
use crate::queue::item::Item;
use crate::queue::manager::QueueManager;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Consumer handle for taking items from the queue
///
/// Consumers share one FIFO stream: each item is delivered to exactly
/// one of them. The name is carried for logging and diagnostics only and
/// has no effect on delivery.
///
/// # Example
///
/// ```rust,no_run
/// # use perishq::queue::api::{QueueConfig, QueueManager};
/// # use std::time::Duration;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QueueConfig::new(16, Duration::from_secs(30), Duration::from_secs(1));
/// let manager = QueueManager::<String>::create(config)?;
/// let consumer = manager.create_consumer("worker-1".to_string());
///
/// let item = consumer.take().await?;
/// println!("{} got: {}", consumer.consumer_name(), item.payload());
/// # Ok(())
/// # }
/// ```
pub struct QueueConsumer<T> {
    consumer_name: String,
    manager: Weak<QueueManager<T>>,
}

impl<T: Send + 'static> QueueConsumer<T> {
    pub(crate) fn new(consumer_name: String, manager: Weak<QueueManager<T>>) -> Self {
        Self {
            consumer_name,
            manager,
        }
    }

    pub fn consumer_name(&self) -> &str {
        &self.consumer_name
    }

    /// Remove and return the oldest live item, waiting as long as needed
    pub async fn take(&self) -> QueueResult<Item<T>> {
        self.queue()?.take().await
    }

    /// Remove the oldest live item, giving up once `timeout` elapses
    pub async fn take_timeout(&self, timeout: Duration) -> QueueResult<Item<T>> {
        self.queue()?.take_timeout(timeout).await
    }

    /// Remove the oldest live item without waiting
    pub fn try_take(&self) -> QueueResult<Option<Item<T>>> {
        self.queue()?.try_take()
    }

    fn queue(&self) -> QueueResult<Arc<PerishableQueue<T>>> {
        // A dead manager means the queue was torn down; treat it exactly
        // like shutdown.
        let manager = self.manager.upgrade().ok_or(QueueError::Cancelled)?;
        Ok(manager.queue())
    }
}
