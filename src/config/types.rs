//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use trust_dns_resolver::proto::rr::RecordType;

use crate::config::constants::{DEFAULT_CONCURRENCY, DNS_TIMEOUT_SECS, ROOT_SERVER};
use crate::error_handling::InitializationError;

/// Analysis performed for every input domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeKind {
    /// Resolve the domain, following the whole CNAME chain, and print all addresses
    Resolve,
    /// Print the closest zone cut (the zone the authoritative nameservers serve)
    Soa,
    /// Compare the response codes of all authoritative nameservers
    #[value(name = "statusdiff")]
    StatusDiff,
    /// Compare the resolved addresses of all authoritative nameservers
    #[value(name = "responsediff")]
    ResponseDiff,
}

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// by library users.
///
/// # Examples
///
/// ```no_run
/// use delegation_probe::{Config, ModeKind};
///
/// let config = Config {
///     mode: ModeKind::StatusDiff,
///     concurrency: 50,
///     ..Default::default()
/// };
/// ```
///
/// ```bash
/// # Zone cuts of every domain in a file, 50 workers
/// delegation_probe -m soa -c 50 -i domains.txt
///
/// # AAAA records, domains from stdin
/// cat domains.txt | delegation_probe --quad
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "delegation_probe",
    about = "Walks the DNS delegation chain from the root for every input domain"
)]
pub struct Config {
    /// Mode to use: resolve, soa, statusdiff, responsediff.
    ///
    /// resolve: resolve the domain and print the whole CNAME chain and all addresses.
    /// soa: print the closest zone cut the domain belongs to.
    /// statusdiff: check whether the authoritative nameservers disagree on the response code.
    /// responsediff: check whether the authoritative nameservers disagree on the resolved addresses.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = ModeKind::Resolve)]
    pub mode: ModeKind,

    /// Query for AAAA records instead of A records
    #[arg(short, long)]
    pub quad: bool,

    /// Number of workers resolving domains concurrently
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// File to read domains from; standard input when absent or "-"
    #[arg(short, long, value_parser)]
    pub input: Option<PathBuf>,

    /// Recursive resolver used by resolve mode instead of walking the delegation chain
    #[arg(short, long)]
    pub resolver: Option<String>,

    /// Root nameserver every uncached walk starts at
    #[arg(long, default_value = ROOT_SERVER)]
    pub root_server: String,

    /// Disable the delegation cache
    #[arg(long)]
    pub no_cache: bool,

    /// Per-attempt query timeout in seconds
    #[arg(long = "timeout", default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Record type queried for every input domain.
    pub fn record_type(&self) -> RecordType {
        if self.quad {
            RecordType::AAAA
        } else {
            RecordType::A
        }
    }

    /// Whether domains are read from standard input.
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }

    /// Rejects configurations the pipeline cannot start with.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.concurrency == 0 {
            return Err(InitializationError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.root_server.trim().is_empty() {
            return Err(InitializationError::InvalidConfig(
                "root server must not be empty".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(InitializationError::InvalidConfig(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeKind::Resolve,
            quad: false,
            concurrency: DEFAULT_CONCURRENCY,
            input: None,
            resolver: None,
            root_server: ROOT_SERVER.to_string(),
            no_cache: false,
            timeout_seconds: DNS_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
