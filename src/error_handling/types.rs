//! Error type definitions.
//!
//! This module defines the transport, per-domain and initialization errors used
//! throughout the application, plus the counter categories they map to.

use std::io;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;
use trust_dns_resolver::error::ResolveError as SystemResolveError;
use trust_dns_resolver::proto::error::ProtoError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Configuration rejected before the pipeline starts.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A single query attempt that did not produce a usable response.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Socket level failure (bind, connect, send, receive).
    #[error("I/O error talking to {nameserver}: {source}")]
    Io {
        nameserver: String,
        #[source]
        source: io::Error,
    },

    /// No response arrived within the per-attempt timeout.
    #[error("timed out waiting for {nameserver}")]
    Timeout { nameserver: String },

    /// The nameserver hostname could not be resolved by the system resolver.
    #[error("could not resolve nameserver {nameserver}: {source}")]
    NameserverLookup {
        nameserver: String,
        #[source]
        source: SystemResolveError,
    },

    /// The nameserver hostname resolved to no addresses.
    #[error("nameserver {nameserver} has no addresses")]
    NoAddress { nameserver: String },

    /// The query could not be encoded or the response could not be decoded.
    #[error("malformed message exchanged with {nameserver}: {source}")]
    Malformed {
        nameserver: String,
        #[source]
        source: ProtoError,
    },

    /// The response does not answer the query that was sent.
    #[error("response id {received} from {nameserver} does not match query id {expected}")]
    IdMismatch {
        nameserver: String,
        expected: u16,
        received: u16,
    },
}

/// Per-domain failure. None of these stop the pipeline.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The exchange failed on every attempt.
    #[error("{domain}: query to {nameserver} failed after {attempts} attempts: {source}")]
    Transport {
        domain: String,
        nameserver: String,
        attempts: usize,
        #[source]
        source: TransportError,
    },

    /// The input is not a valid domain name.
    #[error("{domain}: invalid domain name: {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: ProtoError,
    },

    /// An authoritative answer arrived before any delegation was seen.
    #[error("{domain}: authoritative response ({rcode}) from {nameserver} but no NS records were ever observed")]
    AuthoritativeWithoutDelegation {
        domain: String,
        rcode: String,
        nameserver: String,
    },

    /// A referral without NS records and no earlier delegation to fall back on.
    #[error("{domain}: non-authoritative response ({rcode}) from {nameserver} without NS records")]
    MissingDelegation {
        domain: String,
        rcode: String,
        nameserver: String,
    },

    /// An answer record that `responsediff` cannot turn into a value.
    #[error("{domain}: unknown record type in answer: {record}")]
    UnknownRecordType { domain: String, record: String },

    /// The delegation chain is longer than the walk allows.
    #[error("{domain}: depth limit of {max_depth} reached before an authoritative answer")]
    DepthLimitReached { domain: String, max_depth: usize },

    /// The CNAME chain is longer than `resolve` mode follows.
    #[error("{domain}: CNAME chain longer than {max_hops} hops")]
    CnameChainTooLong { domain: String, max_hops: usize },

    /// The walk produced no NS record to work with.
    #[error("{domain}: did not get any NS records")]
    NoNameservers { domain: String },
}

impl ResolutionError {
    /// The input domain this failure belongs to.
    pub fn domain(&self) -> &str {
        match self {
            ResolutionError::Transport { domain, .. }
            | ResolutionError::InvalidDomain { domain, .. }
            | ResolutionError::AuthoritativeWithoutDelegation { domain, .. }
            | ResolutionError::MissingDelegation { domain, .. }
            | ResolutionError::UnknownRecordType { domain, .. }
            | ResolutionError::DepthLimitReached { domain, .. }
            | ResolutionError::CnameChainTooLong { domain, .. }
            | ResolutionError::NoNameservers { domain } => domain,
        }
    }
}

/// Categories of per-domain failures, counted for the end-of-run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Transport
    QueryFailed,
    // Input
    InvalidDomain,
    // Protocol shape
    AuthoritativeWithoutDelegation,
    MissingDelegation,
    UnknownRecordType,
    // Bound exceeded
    DepthLimitReached,
    CnameChainTooLong,
    // No answer
    NoNameservers,
}

impl ErrorType {
    /// Human readable label used in the statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::QueryFailed => "Query failed after retries",
            ErrorType::InvalidDomain => "Invalid domain name",
            ErrorType::AuthoritativeWithoutDelegation => "Authoritative answer without delegation",
            ErrorType::MissingDelegation => "Referral without NS records",
            ErrorType::UnknownRecordType => "Unknown record type in answer",
            ErrorType::DepthLimitReached => "Delegation depth limit reached",
            ErrorType::CnameChainTooLong => "CNAME chain too long",
            ErrorType::NoNameservers => "No NS records found",
        }
    }
}
