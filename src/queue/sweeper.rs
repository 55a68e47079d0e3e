//! Background expiry sweeper
//!
//! Periodically evicts expired items from a queue so that dead items
//! release their capacity even when nothing is consuming. The sweeper
//! owns no queue state of its own; each pass is one `sweep_now` call on
//! a schedule, and a oneshot channel stops the loop at shutdown.

use crate::queue::internal::PerishableQueue;
use log::{debug, error, trace};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Spawn the sweep loop for `queue`
///
/// Returns the shutdown sender and the task handle; dropping the sender
/// also stops the loop. A failed pass is logged and the schedule keeps
/// running, so one bad pass never disables expiry for good.
pub(crate) fn spawn<T: Send + 'static>(
    queue: Arc<PerishableQueue<T>>,
    sweep_interval: Duration,
) -> (oneshot::Sender<()>, JoinHandle<()>) {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        debug!("Expiry sweeper started (interval: {:?})", sweep_interval);
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    break;
                }
                _ = interval.tick() => {
                    match queue.sweep_now() {
                        Ok(0) => {}
                        Ok(removed) => {
                            trace!(
                                "Expiry sweep evicted {} item(s), occupancy now {}",
                                removed,
                                queue.size()
                            );
                        }
                        Err(e) => {
                            error!("Expiry sweep failed: {}", e);
                        }
                    }
                }
            }
        }
        debug!("Expiry sweeper stopped");
    });

    (shutdown_tx, task)
}
