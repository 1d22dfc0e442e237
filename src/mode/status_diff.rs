//! Response code comparison across the authoritative nameservers.

use trust_dns_resolver::proto::rr::RecordType;

use crate::dns::{display_host, ns_target, parse_domain, rcode_text, Session, Transport};
use crate::error_handling::ResolutionError;

/// Asks every authoritative nameserver of `domain` and reports whether any
/// of them returns a different RCODE than the first one.
///
/// Output: `<domain> [<code>@<ns> ...] <true|false>`, in NS-set order.
pub async fn status_diff<T: Transport>(
    session: &Session<T>,
    domain: &str,
    record_type: RecordType,
) -> Result<String, ResolutionError> {
    let name = parse_domain(domain)?;
    let nameservers = session.walk(domain, record_type).await?;

    let mut statuses = Vec::with_capacity(nameservers.len());
    let mut baseline: Option<String> = None;
    let mut different = false;

    for target in nameservers.iter().filter_map(ns_target) {
        let response = session
            .exchanger()
            .exchange(domain, &name, record_type, &target.to_string())
            .await?;
        let code = rcode_text(response.response_code());

        match &baseline {
            None => baseline = Some(code.clone()),
            Some(first) if *first != code => different = true,
            Some(_) => {}
        }
        statuses.push(format!("{code}@{}", display_host(target)));
    }

    if statuses.is_empty() {
        return Err(ResolutionError::NoNameservers {
            domain: domain.to_string(),
        });
    }
    Ok(format!("{domain} [{}] {different}", statuses.join(" ")))
}
