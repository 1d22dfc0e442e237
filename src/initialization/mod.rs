//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger (plain or JSON)
//! - System resolver used to look up nameserver hostnames
//! - Delegation cache shared by all workers

mod cache;
mod logger;
mod resolver;

// Re-export public API
pub use cache::init_cache;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
