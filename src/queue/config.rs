//! Queue Configuration
//!
//! Construction-time parameters for a perishable queue. All three values
//! must be positive; `validate()` is called by the manager before any
//! queue state is allocated.

use std::time::Duration;

use crate::queue::error::{QueueError, QueueResult};

/// Configuration for a bounded perishable queue
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueueConfig {
    /// Maximum number of items held at any instant
    pub capacity: usize,
    /// Uniform time-to-live applied to every admitted item
    pub ttl: Duration,
    /// Period between background expiry sweeps
    pub sweep_interval: Duration,
}

impl QueueConfig {
    /// Create a new configuration
    ///
    /// The values are not checked here; call [`validate`](Self::validate)
    /// or hand the config to `QueueManager::new`, which validates it.
    pub fn new(capacity: usize, ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            capacity,
            ttl,
            sweep_interval,
        }
    }

    /// Check that every parameter is usable
    ///
    /// A zero capacity can never admit an item, a zero TTL expires items
    /// at the admission instant, and a zero sweep interval would spin the
    /// sweeper. All three are rejected with `InvalidConfig`.
    pub fn validate(&self) -> QueueResult<()> {
        if self.capacity == 0 {
            return Err(QueueError::InvalidConfig {
                reason: "capacity must be greater than zero".to_string(),
            });
        }
        if self.ttl.is_zero() {
            return Err(QueueError::InvalidConfig {
                reason: "ttl must be greater than zero".to_string(),
            });
        }
        if self.sweep_interval.is_zero() {
            return Err(QueueError::InvalidConfig {
                reason: "sweep_interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
