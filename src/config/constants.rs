//! Configuration constants.
//!
//! This module defines the operational parameters of the delegation walk,
//! the query primitive, the delegation cache and the worker pipeline.

use std::time::Duration;

/// Root nameserver queried at the start of every uncached walk (i.root-servers.net).
pub const ROOT_SERVER: &str = "192.36.148.17";
/// Port used when a nameserver is given without one.
pub const DNS_PORT: u16 = 53;

// Delegation walk bounds
/// Maximum number of referrals followed before giving up on a domain.
/// Guards against looping or adversarial delegation chains.
pub const MAX_DELEGATION_DEPTH: usize = 10;
/// Maximum number of CNAME hops followed in `resolve` mode.
pub const MAX_CNAME_HOPS: usize = 10;

// Query primitive
/// Total attempts per exchange (initial attempt + retries).
/// Only transport failures are retried; a negative RCODE is a valid answer.
pub const QUERY_MAX_ATTEMPTS: usize = 3;
/// Fixed delay between attempts in milliseconds
pub const QUERY_RETRY_DELAY_MS: u64 = 100;
/// Per-attempt UDP exchange timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 2;
/// Receive buffer size for UDP responses
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

// Delegation cache
/// Entries are evicted this long after they were written, regardless of DNS TTLs.
pub const CACHE_TIME_TO_LIVE: Duration = Duration::from_secs(10 * 60);
/// Upper bound on cached zone cuts
pub const CACHE_MAX_CAPACITY: u64 = 100_000;

// Worker pipeline
/// Default number of concurrent workers
pub const DEFAULT_CONCURRENCY: usize = 10;
/// Capacity of the bounded input and output channels
pub const CHANNEL_CAPACITY: usize = 256;
/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: u64 = 5;
