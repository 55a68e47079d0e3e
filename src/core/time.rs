//! Time provider abstraction for testable time-dependent logic

#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::Duration;
use std::time::Instant;

/// Abstraction over the monotonic clock for testable time-dependent logic
///
/// Item liveness is a pure function of two instants, so everything that
/// stamps or evaluates ages goes through this trait. Production code uses
/// [`SystemTimeProvider`]; tests inject a mock and advance it manually.
pub trait TimeProvider: Send + Sync + std::fmt::Debug {
    /// Get the current monotonic time (for measuring intervals)
    fn now(&self) -> Instant;
}

/// Production time provider using the actual monotonic clock
#[derive(Debug, Default, Clone)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Mock time provider for deterministic testing
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockTimeProvider {
    current_instant: Arc<Mutex<Instant>>,
}

#[cfg(test)]
impl MockTimeProvider {
    /// Create a new mock time provider starting at the current instant
    pub fn new() -> Self {
        Self {
            current_instant: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Advance the monotonic time by the given duration
    pub fn advance_time(&self, duration: Duration) {
        let mut instant = self.current_instant.lock().unwrap();
        *instant += duration;
    }

    /// Set the current instant (for interval measurements)
    pub fn set_instant(&self, instant: Instant) {
        let mut current = self.current_instant.lock().unwrap();
        *current = instant;
    }
}

#[cfg(test)]
impl TimeProvider for MockTimeProvider {
    fn now(&self) -> Instant {
        *self.current_instant.lock().unwrap()
    }
}
