//! delegation_probe library: bulk DNS delegation walking
//!
//! This library resolves domain names by walking the DNS delegation chain from
//! the root itself instead of asking a recursive resolver, and derives several
//! results from that walk: resolved addresses (following CNAME chains), the
//! zone a name belongs to, and whether the authoritative nameservers of a zone
//! agree on the response code or on the answer.
//!
//! # Example
//!
//! ```no_run
//! use delegation_probe::{run, Config, ModeKind};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     mode: ModeKind::ResponseDiff,
//!     input: Some(std::path::PathBuf::from("domains.txt")),
//!     concurrency: 50,
//!     ..Default::default()
//! };
//!
//! let report = run(config).await?;
//! eprintln!("Processed {} domains: {} succeeded, {} failed",
//!           report.total, report.successful, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod mode;
mod run;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ModeKind};
pub use dns::{DelegationCache, Exchanger, Session, Transport, UdpTransport};
pub use error_handling::{ResolutionError, TransportError};
pub use mode::Mode;
pub use run::{feed_domains, normalize_domain, run, run_with, RunReport};
