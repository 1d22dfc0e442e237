//! Delegation cache initialization.

use crate::config::{CACHE_MAX_CAPACITY, CACHE_TIME_TO_LIVE};
use crate::dns::DelegationCache;

/// Creates the delegation cache shared by all workers, or `None` when disabled.
///
/// Entries live for [`CACHE_TIME_TO_LIVE`] after they were written.
pub fn init_cache(enabled: bool) -> Option<DelegationCache> {
    if !enabled {
        log::info!("Delegation cache disabled, every walk starts at the root");
        return None;
    }
    Some(DelegationCache::new(CACHE_MAX_CAPACITY, CACHE_TIME_TO_LIVE))
}
