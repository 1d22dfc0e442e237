//! Run orchestration.
//!
//! Wires the input source, the worker pipeline and stdout together.

mod input;
mod pipeline;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufRead, BufReader};

use crate::config::Config;
use crate::dns::UdpTransport;
use crate::initialization::init_resolver;

pub use input::{feed_domains, normalize_domain};
pub use pipeline::run_with;

/// Results of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Domains read from the input
    pub total: usize,
    /// Domains that produced an output line
    pub successful: usize,
    /// Domains that failed
    pub failed: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs the configured mode over the input domains and prints results to stdout.
///
/// Domains are read from the configured file, or from stdin when no file (or
/// `-`) is given. Nameservers are contacted over UDP; their hostnames are
/// looked up through the system resolver configuration.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid
/// - The input file cannot be opened or read
/// - Results cannot be written to stdout
///
/// # Example
///
/// ```no_run
/// use delegation_probe::{run, Config, ModeKind};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     mode: ModeKind::Soa,
///     input: Some("domains.txt".into()),
///     ..Default::default()
/// };
/// let report = run(config).await?;
/// println!("{} of {} domains resolved", report.successful, report.total);
/// # Ok(())
/// # }
/// ```
pub async fn run(config: Config) -> Result<RunReport> {
    let input: Box<dyn AsyncBufRead + Unpin + Send> = match config.input.as_ref() {
        Some(path) if !config.reads_stdin() => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => {
            info!("Reading domains from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let timeout = Duration::from_secs(config.timeout_seconds);
    let resolver = init_resolver(timeout);
    let make_transport = move || UdpTransport::new(Arc::clone(&resolver), timeout);

    run_with(&config, make_transport, input, tokio::io::stdout()).await
}
