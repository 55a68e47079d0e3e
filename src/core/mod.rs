//! Core services and infrastructure

pub mod sync;
pub mod time;
