//! Queue Producer for inserting payloads
//!
//! Producers insert payloads into the shared queue on behalf of a named
//! source; every admitted item carries the producer's tag so consumers
//! can tell where it came from. The handle holds a weak reference to the
//! manager and reports `Cancelled` once the manager is gone.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::PerishableQueue;
use crate::queue::manager::QueueManager;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Producer handle for inserting payloads into the queue
///
/// The QueueProducer is a lightweight handle over the shared queue.
/// Items it admits are stamped with its tag and with the admission
/// instant; time spent blocked waiting for a slot does not count against
/// an item's lifetime.
///
/// # Example
///
/// ```rust,no_run
/// # use perishq::queue::api::{QueueConfig, QueueManager};
/// # use std::time::Duration;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QueueConfig::new(16, Duration::from_secs(30), Duration::from_secs(1));
/// let manager = QueueManager::<String>::create(config)?;
/// let producer = manager.create_producer("ingest".to_string());
///
/// producer.put("payload".to_string()).await?;
/// producer.put_timeout("urgent".to_string(), Duration::from_millis(250)).await?;
/// # Ok(())
/// # }
/// ```
pub struct QueueProducer<T> {
    producer_tag: String,
    manager: Weak<QueueManager<T>>,
}

impl<T: Send + 'static> QueueProducer<T> {
    pub(crate) fn new(producer_tag: String, manager: Weak<QueueManager<T>>) -> Self {
        Self {
            producer_tag,
            manager,
        }
    }

    pub fn producer_tag(&self) -> &str {
        &self.producer_tag
    }

    /// Insert a payload, waiting as long as needed for a free slot
    pub async fn put(&self, payload: T) -> QueueResult<()> {
        self.queue()?.put_tagged(payload, &self.producer_tag).await
    }

    /// Insert a payload with a deadline on the wait
    pub async fn put_timeout(&self, payload: T, timeout: Duration) -> QueueResult<()> {
        self.queue()?
            .put_tagged_timeout(payload, &self.producer_tag, timeout)
            .await
    }

    /// Insert a payload without waiting
    pub fn try_put(&self, payload: T) -> QueueResult<()> {
        self.queue()?.try_put_tagged(payload, &self.producer_tag)
    }

    fn queue(&self) -> QueueResult<Arc<PerishableQueue<T>>> {
        // A dead manager means the queue was torn down; treat it exactly
        // like shutdown.
        let manager = self.manager.upgrade().ok_or(QueueError::Cancelled)?;
        Ok(manager.queue())
    }
}
