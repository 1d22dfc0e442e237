//! Error categorization and retry strategy.
//!
//! This module maps per-domain failures to counter categories and configures
//! the retry strategy of the query primitive.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::stats::ProcessingStats;
use super::types::{ErrorType, ResolutionError};

/// Creates the retry strategy for a single DNS exchange.
///
/// `tokio_retry::Retry` makes one initial attempt and then one more attempt per
/// yielded delay, so the iterator is limited to `QUERY_MAX_ATTEMPTS - 1` delays.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    FixedInterval::from_millis(crate::config::QUERY_RETRY_DELAY_MS)
        .take(crate::config::QUERY_MAX_ATTEMPTS.saturating_sub(1))
}

/// Categorizes a per-domain failure into an `ErrorType`.
pub fn categorize_resolution_error(error: &ResolutionError) -> ErrorType {
    match error {
        ResolutionError::Transport { .. } => ErrorType::QueryFailed,
        ResolutionError::InvalidDomain { .. } => ErrorType::InvalidDomain,
        ResolutionError::AuthoritativeWithoutDelegation { .. } => {
            ErrorType::AuthoritativeWithoutDelegation
        }
        ResolutionError::MissingDelegation { .. } => ErrorType::MissingDelegation,
        ResolutionError::UnknownRecordType { .. } => ErrorType::UnknownRecordType,
        ResolutionError::DepthLimitReached { .. } => ErrorType::DepthLimitReached,
        ResolutionError::CnameChainTooLong { .. } => ErrorType::CnameChainTooLong,
        ResolutionError::NoNameservers { .. } => ErrorType::NoNameservers,
    }
}

/// Records a per-domain failure in the shared statistics.
pub fn update_error_stats(stats: &ProcessingStats, error: &ResolutionError) {
    stats.increment_error(categorize_resolution_error(error));
}
