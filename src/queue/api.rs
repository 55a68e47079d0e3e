//! Public API for the queue system
//!
//! This module provides the complete public API for the perishable queue
//! system. External modules should import from here rather than directly
//! from internal modules. See module documentation for complete usage
//! examples and architecture details.

// Core queue components
pub use crate::queue::consumer::QueueConsumer;
pub use crate::queue::manager::QueueManager;
pub use crate::queue::producer::QueueProducer;

// Queue implementation and item types
pub use crate::queue::internal::PerishableQueue;
pub use crate::queue::item::{Item, DIRECT_PRODUCER_TAG};

// Configuration
pub use crate::queue::config::QueueConfig;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Type definitions and statistics
pub use crate::queue::types::QueueStats;
