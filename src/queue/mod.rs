//! Bounded Perishable Queue Component
//!
//! A reusable bounded producer/consumer queue whose items expire. Every
//! admitted item carries its admission instant; once an item's age
//! reaches the queue-wide TTL it is dead and will never be delivered,
//! whether a consumer shows up or not.
//!
//! # Overview
//!
//! This module provides a generic blocking queue for handing work
//! between concurrent producers and consumers. Key features include:
//!
//! - **Bounded Capacity**: puts block while the buffer is full and
//!   resume when a slot frees, through consumption or expiry
//! - **Perishable Items**: a uniform TTL, measured from the admission
//!   instant, applies to every item
//! - **Active Expiry**: a background sweeper evicts dead items on a
//!   schedule, so stalled consumers cannot wedge blocked producers
//! - **FIFO Delivery**: live items reach consumers strictly in admission
//!   order, each item to exactly one consumer
//! - **Cancellation**: timeouts on every blocking wait, and shutdown
//!   releases all blocked operations with `Cancelled`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ put                │ put                │ put
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                     QueueManager<T>                     │
//! │  ┌───────────────────────────────────────────────────┐ │
//! │  │        PerishableQueue<T>  (bounded FIFO)         │ │
//! │  │   oldest ──────────────────────────── newest      │ │
//! │  │  ┌──────┬──────┬──────┬──────┬──────┬──────┐      │ │
//! │  │  │ item │ item │ item │ item │      │      │      │ │
//! │  │  └──┬───┴──────┴──────┴──────┴──────┴──────┘      │ │
//! │  │     │ expired prefix evicted                      │ │
//! │  └─────┼─────────────────────────────────────────────┘ │
//! │        │ sweep            ┌────────────────┐           │
//! │        └──────────────────│ Expiry Sweeper │           │
//! │                           └────────────────┘           │
//! └─────────────────────────────────────────────────────────┘
//!        │ take                │ take
//! ┌──────┴───────┐     ┌───────┴──────┐
//! │  Consumer A  │     │  Consumer B  │   (each item to exactly one)
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use perishq::queue::api::{QueueConfig, QueueManager};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create and start the queue system
//! let config = QueueConfig::new(16, Duration::from_secs(30), Duration::from_secs(1));
//! let manager = QueueManager::<String>::create(config)?;
//!
//! // Produce
//! let producer = manager.create_producer("ingest".to_string());
//! producer.put("first payload".to_string()).await?;
//!
//! // Consume
//! let consumer = manager.create_consumer("worker".to_string());
//! let item = consumer.take().await?;
//! println!("Received: {} (from {})", item.payload(), item.producer_tag());
//!
//! // Shut down, releasing any blocked operations
//! manager.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;

mod config;
mod consumer;
mod error;
mod gate;
mod internal;
mod item;
mod manager;
mod producer;
mod sweeper;
mod types;

pub use config::QueueConfig;
pub use consumer::QueueConsumer;
pub use error::{QueueError, QueueResult};
pub use internal::PerishableQueue;
pub use item::{Item, DIRECT_PRODUCER_TAG};
pub use manager::QueueManager;
pub use producer::QueueProducer;
pub use types::QueueStats;

#[cfg(test)]
mod tests;
