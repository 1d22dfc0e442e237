//! System resolver initialization.
//!
//! Nameserver hostnames taken from NS records are turned into addresses by
//! the operating environment's resolver configuration, not by walking the
//! tree again.

use std::sync::Arc;
use std::time::Duration;

use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Initializes the resolver used to look up nameserver addresses.
///
/// Reads the system configuration (`/etc/resolv.conf` on Unix) and falls back
/// to the library defaults when it cannot be read. Search domains are never
/// appended (`ndots = 0`).
///
/// # Arguments
///
/// * `timeout` - Per-attempt lookup timeout
pub fn init_resolver(timeout: Duration) -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match trust_dns_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            log::warn!("Failed to read system resolver configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    opts.timeout = timeout;
    opts.attempts = 2;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
