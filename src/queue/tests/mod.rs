//! Test modules for the queue system
//!
//! This module organizes all the test suites for the perishable queue
//! system. Tests are organized by functional area for better
//! maintainability.

mod core_functionality;
