//! Resolution modes.
//!
//! Every mode turns one input domain into one output line using a worker's
//! `Session`:
//! - `resolve`: addresses, following the CNAME chain
//! - `soa`: the closest zone cut
//! - `statusdiff`: RCODE agreement across the authoritative nameservers
//! - `responsediff`: answer agreement across the authoritative nameservers
//!
//! The mode is chosen once at startup and shared by all workers.

mod format;
mod resolve;
mod response_diff;
mod status_diff;
mod zone;

use trust_dns_resolver::proto::rr::RecordType;

use crate::config::{Config, ModeKind};
use crate::dns::{Session, Transport};
use crate::error_handling::ResolutionError;

// Re-export public API
pub use format::{bracketed, pretty_print};
pub use resolve::{resolve, resolve_chain, resolve_with};
pub use response_diff::{differs, response_diff, NameserverAnswer};
pub use status_diff::status_diff;
pub use zone::zone_of;

/// A resolution mode with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Addresses of the domain. With `resolver` set, a single recursive query
    /// to that resolver replaces the delegation walk.
    Resolve {
        record_type: RecordType,
        resolver: Option<String>,
    },
    /// Zone the domain belongs to.
    Zone { record_type: RecordType },
    /// RCODE comparison across the authoritative nameservers.
    StatusDiff { record_type: RecordType },
    /// Answer comparison across the authoritative nameservers.
    ResponseDiff { record_type: RecordType },
}

impl Mode {
    pub fn from_config(config: &Config) -> Self {
        let record_type = config.record_type();
        if config.resolver.is_some() && config.mode != ModeKind::Resolve {
            log::warn!("--resolver only applies to resolve mode, ignoring it");
        }
        match config.mode {
            ModeKind::Resolve => Mode::Resolve {
                record_type,
                resolver: config.resolver.clone(),
            },
            ModeKind::Soa => Mode::Zone { record_type },
            ModeKind::StatusDiff => Mode::StatusDiff { record_type },
            ModeKind::ResponseDiff => Mode::ResponseDiff { record_type },
        }
    }

    /// Whether this mode walks the delegation chain (and can use the delegation cache).
    pub fn walks_delegations(&self) -> bool {
        !matches!(
            self,
            Mode::Resolve {
                resolver: Some(_),
                ..
            }
        )
    }

    /// Produces the output line for `domain`.
    pub async fn run<T: Transport>(
        &self,
        domain: &str,
        session: &Session<T>,
    ) -> Result<String, ResolutionError> {
        match self {
            Mode::Resolve {
                record_type,
                resolver: Some(resolver),
            } => resolve_with(session, domain, *record_type, resolver).await,
            Mode::Resolve {
                record_type,
                resolver: None,
            } => resolve(session, domain, *record_type).await,
            Mode::Zone { record_type } => zone_of(session, domain, *record_type).await,
            Mode::StatusDiff { record_type } => status_diff(session, domain, *record_type).await,
            Mode::ResponseDiff { record_type } => {
                response_diff(session, domain, *record_type).await
            }
        }
    }
}
