//! Type definitions for the queue system
//!
//! This module contains the core data structures used throughout
//! the queue system for statistics and occupancy reporting.

/// Point-in-time statistics for a perishable queue
///
/// Counters are cumulative since construction. `size` is the occupancy
/// at the instant the snapshot was taken and may be stale by the time
/// the caller inspects it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QueueStats {
    /// Items currently buffered
    pub size: usize,
    /// Configured maximum occupancy
    pub capacity: usize,
    /// Items admitted by any producer
    pub total_enqueued: usize,
    /// Live items handed to consumers
    pub total_delivered: usize,
    /// Dead items discarded while a consumer was taking
    pub total_expired_on_take: usize,
    /// Dead items evicted by the background sweeper
    pub total_swept: usize,
}

impl QueueStats {
    /// Dead items removed through either path
    pub fn total_expired(&self) -> usize {
        self.total_expired_on_take + self.total_swept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_to_json() {
        let stats = QueueStats {
            size: 2,
            capacity: 8,
            total_enqueued: 10,
            total_delivered: 6,
            total_expired_on_take: 1,
            total_swept: 1,
        };

        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            serde_json::json!({
                "size": 2,
                "capacity": 8,
                "total_enqueued": 10,
                "total_delivered": 6,
                "total_expired_on_take": 1,
                "total_swept": 1,
            })
        );
    }
}
