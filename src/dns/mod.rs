//! DNS delegation walking.
//!
//! This module provides the building blocks every resolution mode runs on:
//! - A single-attempt `Transport` (UDP) behind an async trait
//! - The retrying query primitive (`Exchanger`) with cache write-through
//! - The shared, time-bounded `DelegationCache` with longest-suffix lookup
//! - The `DelegationWalker`, which follows referrals from the root
//!
//! Nameserver hostnames taken from NS records are resolved through the
//! operating environment's resolver, never through glue records.

mod cache;
mod exchange;
pub(crate) mod records;
mod transport;
mod walker;

// Re-export public API
pub use cache::DelegationCache;
pub use exchange::{build_query, parse_domain, Exchanger};
pub use records::{answer_value, display_host, fqdn, ns_target, rcode_text};
pub use transport::{parse_socket_addr, Transport, UdpTransport};
pub use walker::{DelegationWalker, Session};
