//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Rejected at construction: capacity, TTL and sweep interval must all
    /// be positive.
    #[error("Invalid queue configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Non-blocking admission found the queue at capacity. Only `try_put`
    /// reports this; blocking `put` waits instead.
    #[error("Queue is full (capacity: {capacity})")]
    Full { capacity: usize },

    /// A blocking wait was released by shutdown, or the queue was already
    /// closed when the call was made.
    #[error("Operation cancelled: queue is shut down")]
    Cancelled,

    /// A caller-supplied deadline elapsed before the wait could complete.
    /// Queue state is unaffected.
    #[error("Operation timed out while waiting for queue state")]
    Timeout,
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
