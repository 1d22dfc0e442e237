//! Address resolution with CNAME-chain following.

use trust_dns_resolver::proto::op::{Message, Query};
use trust_dns_resolver::proto::rr::{RData, Record, RecordType};

use crate::config::MAX_CNAME_HOPS;
use crate::dns::{ns_target, parse_domain, Session, Transport};
use crate::error_handling::ResolutionError;

use super::format::pretty_print;

/// Resolves `domain` by walking the delegation chain for every name in its
/// CNAME chain, and formats the result.
pub async fn resolve<T: Transport>(
    session: &Session<T>,
    domain: &str,
    record_type: RecordType,
) -> Result<String, ResolutionError> {
    let message = resolve_chain(session, domain, record_type).await?;
    Ok(pretty_print(&message))
}

/// Follows the CNAME chain of `domain` for up to [`MAX_CNAME_HOPS`] hops.
///
/// Each hop walks the delegation chain for the current target and asks the
/// first authoritative nameserver. The chain ends with the first response that
/// carries no CNAME: addresses, an empty answer, or anything else. When CNAMEs
/// were followed, the returned message is built from scratch: its question is
/// `domain` and its answers are the CNAMEs in chain order followed by the
/// addresses.
pub async fn resolve_chain<T: Transport>(
    session: &Session<T>,
    domain: &str,
    record_type: RecordType,
) -> Result<Message, ResolutionError> {
    let original = parse_domain(domain)?;
    let mut target = original.clone();
    let mut cnames: Vec<Record> = Vec::new();
    let mut addresses: Vec<Record> = Vec::new();

    for hop in 0..MAX_CNAME_HOPS {
        let nameservers = session.walk(&target.to_string(), record_type).await?;
        let nameserver = nameservers
            .iter()
            .find_map(ns_target)
            .map(|name| name.to_string())
            .ok_or_else(|| ResolutionError::NoNameservers {
                domain: domain.to_string(),
            })?;

        let response = session
            .exchanger()
            .exchange(domain, &target, record_type, &nameserver)
            .await?;

        let mut followed = false;
        for record in response.answers() {
            match record.data() {
                Some(RData::CNAME(cname)) => {
                    log::trace!("{domain}: hop {hop} {} is an alias for {}", record.name(), cname.0);
                    target = cname.0.clone();
                    cnames.push(record.clone());
                    followed = true;
                }
                Some(RData::A(_)) | Some(RData::AAAA(_)) => {
                    addresses.push(record.clone());
                }
                _ => {}
            }
        }

        // A CNAME answered together with its addresses completes the chain too
        if !followed || !addresses.is_empty() {
            if cnames.is_empty() {
                return Ok(response);
            }
            let mut composite = Message::new();
            composite.add_query(Query::query(original, record_type));
            composite.add_answers(cnames);
            composite.add_answers(addresses);
            return Ok(composite);
        }
    }

    Err(ResolutionError::CnameChainTooLong {
        domain: domain.to_string(),
        max_hops: MAX_CNAME_HOPS,
    })
}

/// Plain address resolution: one recursive query to `resolver`, no walk and no cache.
pub async fn resolve_with<T: Transport>(
    session: &Session<T>,
    domain: &str,
    record_type: RecordType,
    resolver: &str,
) -> Result<String, ResolutionError> {
    let name = parse_domain(domain)?;
    let response = session
        .exchanger()
        .query(domain, &name, record_type, resolver)
        .await?;
    Ok(pretty_print(&response))
}
