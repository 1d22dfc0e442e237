//! Delegation walker.
//!
//! Follows NS referrals from the root (or from the closest cached zone cut)
//! until a nameserver answers authoritatively, and returns the NS set that
//! delegated to it.

use std::sync::Arc;

use trust_dns_resolver::proto::op::Message;
use trust_dns_resolver::proto::rr::{Name, Record, RecordType};

use crate::config::MAX_DELEGATION_DEPTH;
use crate::error_handling::ResolutionError;

use super::exchange::{parse_domain, Exchanger};
use super::records::{first_ns, ns_records, ns_target, rcode_text};
use super::transport::Transport;

/// Transient state of one walk. Never shared between walks.
struct WalkState {
    /// Nameserver that produced `answer`
    nameserver: String,
    /// Last NS set observed in a referral (or in the cached zone cut)
    nameservers: Vec<Record>,
    answer: Arc<Message>,
    depth: usize,
}

/// Walks the delegation chain for one domain at a time.
pub struct DelegationWalker<'a, T: Transport> {
    exchanger: &'a Exchanger<T>,
    root_server: &'a str,
}

impl<'a, T: Transport> DelegationWalker<'a, T> {
    pub fn new(exchanger: &'a Exchanger<T>, root_server: &'a str) -> Self {
        Self {
            exchanger,
            root_server,
        }
    }

    /// Returns the NS records of the zone that answers authoritatively for `domain`.
    ///
    /// The first query goes to the root (or is skipped on a cache hit) for
    /// `record_type`; every following hop asks the first nameserver of the last
    /// referral for the A record of `domain`. Stops after
    /// [`MAX_DELEGATION_DEPTH`] referrals.
    ///
    /// A referral without NS records ends the walk successfully when an
    /// earlier referral already provided an NS set; that set is returned.
    pub async fn walk(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>, ResolutionError> {
        let name = parse_domain(domain)?;
        let mut state = self.start(domain, &name, record_type).await?;

        while state.depth < MAX_DELEGATION_DEPTH {
            if state.answer.authoritative() {
                if state.nameservers.is_empty() {
                    return Err(ResolutionError::AuthoritativeWithoutDelegation {
                        domain: domain.to_string(),
                        rcode: rcode_text(state.answer.response_code()),
                        nameserver: state.nameserver,
                    });
                }
                log::trace!(
                    "{domain}: authoritative answer from {} after {} referrals",
                    state.nameserver,
                    state.depth
                );
                return Ok(state.nameservers);
            }

            let next = match first_ns(&state.answer).and_then(ns_target) {
                Some(target) => target.to_string(),
                None if !state.nameservers.is_empty() => {
                    log::debug!(
                        "{domain}: non-authoritative {} from {} without NS records, using previous delegation",
                        rcode_text(state.answer.response_code()),
                        state.nameserver
                    );
                    return Ok(state.nameservers);
                }
                None => {
                    return Err(ResolutionError::MissingDelegation {
                        domain: domain.to_string(),
                        rcode: rcode_text(state.answer.response_code()),
                        nameserver: state.nameserver,
                    });
                }
            };

            state.nameservers = ns_records(&state.answer);
            log::trace!("{domain}: referral {} to {next}", state.depth + 1);

            let response = self
                .exchanger
                .exchange(domain, &name, RecordType::A, &next)
                .await?;
            state.answer = Arc::new(response);
            state.nameserver = next;
            state.depth += 1;
        }

        Err(ResolutionError::DepthLimitReached {
            domain: domain.to_string(),
            max_depth: MAX_DELEGATION_DEPTH,
        })
    }

    /// First answer of the walk: the closest cached zone cut, or the root's referral.
    async fn start(
        &self,
        domain: &str,
        name: &Name,
        record_type: RecordType,
    ) -> Result<WalkState, ResolutionError> {
        if let Some(cache) = self.exchanger.cache() {
            if let Some((zone, message)) = cache.lookup(&name.to_string()) {
                log::debug!("{domain}: starting at cached zone cut {zone}");
                return Ok(WalkState {
                    nameserver: zone,
                    nameservers: ns_records(&message),
                    answer: message,
                    depth: 0,
                });
            }
        }

        let response = self
            .exchanger
            .exchange(domain, name, record_type, self.root_server)
            .await?;
        Ok(WalkState {
            nameserver: self.root_server.to_string(),
            nameservers: Vec::new(),
            answer: Arc::new(response),
            depth: 0,
        })
    }
}

/// One worker's view of the network: its own exchanger plus the root to start from.
pub struct Session<T: Transport> {
    exchanger: Exchanger<T>,
    root_server: String,
}

impl<T: Transport> Session<T> {
    pub fn new(exchanger: Exchanger<T>, root_server: impl Into<String>) -> Self {
        Self {
            exchanger,
            root_server: root_server.into(),
        }
    }

    pub fn exchanger(&self) -> &Exchanger<T> {
        &self.exchanger
    }

    pub fn walker(&self) -> DelegationWalker<'_, T> {
        DelegationWalker::new(&self.exchanger, &self.root_server)
    }

    /// Shorthand for `self.walker().walk(domain, record_type)`.
    pub async fn walk(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>, ResolutionError> {
        self.walker().walk(domain, record_type).await
    }
}
