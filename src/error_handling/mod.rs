//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (transport, per-domain, initialization)
//! - Failure categorization and counters
//! - Retry strategy configuration for the query primitive
//!
//! Per-domain errors fall into four groups:
//! - **Transport**: the exchange failed on every attempt
//! - **Protocol shape**: the delegation chain or an answer has an unexpected form
//! - **Bound exceeded**: delegation depth or CNAME chain length limit reached
//! - **No answer**: the walk produced no NS records

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_resolution_error, get_retry_strategy, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{ErrorType, InitializationError, ResolutionError, TransportError};
