//! Query primitive: one logical DNS exchange with bounded retry.

use std::sync::atomic::{AtomicUsize, Ordering};

use trust_dns_resolver::proto::op::{Message, MessageType, OpCode, Query};
use trust_dns_resolver::proto::rr::{Name, RecordType};

use crate::error_handling::{get_retry_strategy, ResolutionError, TransportError};

use super::cache::DelegationCache;
use super::records::fqdn;
use super::transport::Transport;

/// Builds a standard query for `name`/`record_type` with a random id.
pub fn build_query(name: Name, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(rand::random::<u16>())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name, record_type));
    message
}

/// Parses an input domain into a fully qualified name.
pub fn parse_domain(domain: &str) -> Result<Name, ResolutionError> {
    Name::from_ascii(fqdn(domain)).map_err(|source| ResolutionError::InvalidDomain {
        domain: domain.to_string(),
        source,
    })
}

/// A worker's query session: its own transport plus the shared delegation cache.
///
/// Transport failures (timeouts, refused connections, undecodable responses)
/// are retried; a well-formed response with a negative RCODE is returned as is.
pub struct Exchanger<T: Transport> {
    transport: T,
    cache: Option<DelegationCache>,
}

impl<T: Transport> Exchanger<T> {
    pub fn new(transport: T, cache: Option<DelegationCache>) -> Self {
        Self { transport, cache }
    }

    /// The delegation cache, when caching is enabled.
    pub fn cache(&self) -> Option<&DelegationCache> {
        self.cache.as_ref()
    }

    /// Queries `nameserver` and records the zone cut of the response in the cache.
    ///
    /// `domain` is the input domain the query is made on behalf of; it only
    /// labels the error.
    pub async fn exchange(
        &self,
        domain: &str,
        name: &Name,
        record_type: RecordType,
        nameserver: &str,
    ) -> Result<Message, ResolutionError> {
        let response = self.query(domain, name, record_type, nameserver).await?;
        if let Some(cache) = &self.cache {
            cache.store_response(&response);
        }
        Ok(response)
    }

    /// Queries `nameserver` without touching the cache.
    pub async fn query(
        &self,
        domain: &str,
        name: &Name,
        record_type: RecordType,
        nameserver: &str,
    ) -> Result<Message, ResolutionError> {
        let attempts = AtomicUsize::new(0);
        let transport = &self.transport;
        let attempts_ref = &attempts;

        let result: Result<Message, TransportError> =
            tokio_retry::Retry::spawn(get_retry_strategy(), move || {
                let attempt = attempts_ref.fetch_add(1, Ordering::SeqCst) + 1;
                let query = build_query(name.clone(), record_type);
                async move {
                    log::trace!("{name} {record_type} @{nameserver} (attempt {attempt})");
                    transport.send(&query, nameserver).await.map_err(|e| {
                        log::debug!("attempt {attempt} for {name} {record_type} @{nameserver} failed: {e}");
                        e
                    })
                }
            })
            .await;

        result.map_err(|source| ResolutionError::Transport {
            domain: domain.to_string(),
            nameserver: nameserver.to_string(),
            attempts: attempts.load(Ordering::SeqCst),
            source,
        })
    }
}
