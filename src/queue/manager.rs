//! QueueManager - Central coordination for the perishable queue
//!
//! The QueueManager owns the shared queue, runs the background expiry
//! sweeper, and hands out producer and consumer handles. It is the only
//! component with a lifecycle: `start` launches the sweeper and `stop`
//! closes the queue and reaps the sweeper task.

use crate::core::sync::handle_mutex_poison;
use crate::core::time::{SystemTimeProvider, TimeProvider};
use crate::queue::config::QueueConfig;
use crate::queue::consumer::QueueConsumer;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::PerishableQueue;
use crate::queue::producer::QueueProducer;
use crate::queue::sweeper;
use crate::queue::types::QueueStats;
use log::{error, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Central manager for one bounded perishable queue
///
/// The QueueManager is responsible for:
/// - Validating configuration and building the shared queue
/// - Running the background expiry sweeper between `start` and `stop`
/// - Creating producer and consumer handles bound to the queue
/// - Orderly shutdown that releases every blocked operation
///
/// # Thread Safety
///
/// The QueueManager is fully thread-safe and is meant to be shared as
/// `Arc<QueueManager<T>>`. Handles hold weak references, so dropping the
/// last `Arc` tears the queue down even if handles are still around.
///
/// # Example
///
/// ```rust,no_run
/// use perishq::queue::api::{QueueConfig, QueueManager};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QueueConfig::new(16, Duration::from_secs(30), Duration::from_secs(1));
/// let manager = QueueManager::<String>::create(config)?;
///
/// manager.queue().put("hello".to_string()).await?;
/// let item = manager.queue().take().await?;
/// println!("took: {}", item.payload());
///
/// manager.stop().await?;
/// # Ok(())
/// # }
/// ```
pub struct QueueManager<T> {
    /// Shared queue every handle operates on
    queue: Arc<PerishableQueue<T>>,
    /// Sweep cadence from the validated configuration
    sweep_interval: Duration,
    /// Shutdown signal for the running sweeper, if any
    sweeper_shutdown: Mutex<Option<oneshot::Sender<()>>>,
    /// Join handle for the running sweeper, if any
    sweeper_task: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> QueueManager<T> {
    /// Create a manager with the production clock
    ///
    /// The configuration is validated here; nothing is allocated for an
    /// invalid one. The sweeper does not run until `start` is called.
    pub fn new(config: QueueConfig) -> QueueResult<Self> {
        Self::with_clock(config, Arc::new(SystemTimeProvider))
    }

    /// Create a manager with an explicit clock
    pub fn with_clock(config: QueueConfig, clock: Arc<dyn TimeProvider>) -> QueueResult<Self> {
        let sweep_interval = config.sweep_interval;
        let queue = Arc::new(PerishableQueue::new(config, clock)?);
        Ok(Self {
            queue,
            sweep_interval,
            sweeper_shutdown: Mutex::new(None),
            sweeper_task: Mutex::new(None),
        })
    }

    /// Create a started manager wrapped for shared ownership
    ///
    /// Convenience for the common case: validate, allocate, launch the
    /// sweeper. Must be called from within a Tokio runtime.
    pub fn create(config: QueueConfig) -> QueueResult<Arc<Self>> {
        let manager = Arc::new(Self::new(config)?);
        manager.start()?;
        Ok(manager)
    }

    /// Launch the background expiry sweeper
    ///
    /// Must be called from within a Tokio runtime. Idempotent: a second
    /// call while the sweeper is already running is ignored with a
    /// warning, as is a call after shutdown.
    pub fn start(&self) -> QueueResult<()> {
        let mut shutdown_slot = self.lock_lifecycle(&self.sweeper_shutdown)?;
        let mut task_slot = self.lock_lifecycle(&self.sweeper_task)?;

        if self.queue.is_closed() {
            warn!("Queue is shut down, ignoring start request");
            return Ok(());
        }
        if shutdown_slot.is_some() {
            warn!("Expiry sweeper already running, ignoring start request");
            return Ok(());
        }

        let (shutdown_tx, task) = sweeper::spawn(Arc::clone(&self.queue), self.sweep_interval);
        *shutdown_slot = Some(shutdown_tx);
        *task_slot = Some(task);
        Ok(())
    }

    /// Shut down the queue and reap the sweeper
    ///
    /// Closes the queue first so every blocked put and take is released
    /// with `Cancelled`, then stops the sweep loop and waits for it to
    /// finish. Items still buffered remain takeable until drained.
    /// Idempotent: repeat calls find nothing left to do.
    pub async fn stop(&self) -> QueueResult<()> {
        self.queue.close();

        let shutdown_tx = self.lock_lifecycle(&self.sweeper_shutdown)?.take();
        if let Some(tx) = shutdown_tx {
            let _ = tx.send(());
        }

        let task = self.lock_lifecycle(&self.sweeper_task)?.take();
        if let Some(task) = task {
            match task.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    error!("Expiry sweeper task failed: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Create a producer handle stamping `producer_tag` on its items
    pub fn create_producer(self: &Arc<Self>, producer_tag: String) -> QueueProducer<T> {
        QueueProducer::new(producer_tag, Arc::downgrade(self))
    }

    /// Create a named consumer handle
    pub fn create_consumer(self: &Arc<Self>, consumer_name: String) -> QueueConsumer<T> {
        QueueConsumer::new(consumer_name, Arc::downgrade(self))
    }

    /// Direct access to the shared queue
    pub fn queue(&self) -> Arc<PerishableQueue<T>> {
        Arc::clone(&self.queue)
    }

    /// Current occupancy, dead items included
    pub fn size(&self) -> usize {
        self.queue.size()
    }

    /// Snapshot of occupancy and cumulative counters
    pub fn stats(&self) -> QueueResult<QueueStats> {
        self.queue.stats()
    }

    /// Evict expired items immediately, outside the sweep schedule
    pub fn sweep_now(&self) -> QueueResult<usize> {
        self.queue.sweep_now()
    }

    fn lock_lifecycle<'a, U>(&self, mutex: &'a Mutex<U>) -> QueueResult<MutexGuard<'a, U>> {
        handle_mutex_poison(mutex.lock(), |message| {
            error!("Queue lifecycle lock poisoned: {}", message);
            QueueError::Cancelled
        })
    }
}

impl<T> Drop for QueueManager<T> {
    fn drop(&mut self) {
        // Last owner is going away: close the queue so handle operations
        // fail fast, and abort the sweeper rather than leak the task.
        self.queue.close();
        if let Ok(mut slot) = self.sweeper_shutdown.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(());
            }
        }
        if let Ok(mut slot) = self.sweeper_task.lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
    }
}
