//! Main application modules.
//!
//! This module provides progress logging, background task shutdown and
//! end-of-run statistics used by the worker pipeline.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_run_summary};
