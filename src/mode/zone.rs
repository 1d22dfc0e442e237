//! Zone lookup: the closest zone cut a domain belongs to.

use trust_dns_resolver::proto::rr::RecordType;

use crate::dns::{ns_target, Session, Transport};
use crate::error_handling::ResolutionError;

/// Formats `<zone> for <domain>`, where `<zone>` is the owner of the first NS
/// record returned by the walk.
pub async fn zone_of<T: Transport>(
    session: &Session<T>,
    domain: &str,
    record_type: RecordType,
) -> Result<String, ResolutionError> {
    let nameservers = session.walk(domain, record_type).await?;
    let zone = nameservers
        .iter()
        .find(|record| ns_target(record).is_some())
        .map(|record| record.name().to_string())
        .ok_or_else(|| ResolutionError::NoNameservers {
            domain: domain.to_string(),
        })?;
    Ok(format!("{zone} for {domain}"))
}
