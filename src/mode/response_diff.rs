//! Answer comparison across the authoritative nameservers.

use trust_dns_resolver::proto::op::Message;
use trust_dns_resolver::proto::rr::RecordType;

use crate::dns::{answer_value, display_host, ns_target, parse_domain, Session, Transport};
use crate::error_handling::ResolutionError;

use super::format::bracketed;

/// Sorted answer values of one nameserver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameserverAnswer {
    pub nameserver: String,
    pub values: Vec<String>,
}

/// Whether `candidate` disagrees with `baseline`.
///
/// Lists of different length always differ. Equal-length lists are compared
/// element by element; two empty lists are equal.
pub fn differs(baseline: &[String], candidate: &[String]) -> bool {
    if baseline.len() != candidate.len() {
        return true;
    }
    if candidate.is_empty() {
        return false;
    }
    baseline
        .iter()
        .zip(candidate)
        .any(|(expected, actual)| expected != actual)
}

/// Sorted A/AAAA/CNAME values of the answer section.
fn sorted_values(domain: &str, response: &Message) -> Result<Vec<String>, ResolutionError> {
    let mut values = response
        .answers()
        .iter()
        .map(|record| {
            answer_value(record).ok_or_else(|| ResolutionError::UnknownRecordType {
                domain: domain.to_string(),
                record: record.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    values.sort();
    Ok(values)
}

/// Asks the authoritative nameservers of `domain` one after another and stops
/// at the first one whose answer differs from the first nameserver's.
///
/// Output: `<domain> <true|false> [<values>]@<ns1>`, followed by
/// ` [<values>]@<ns>` of the diverging nameserver when there is one.
pub async fn response_diff<T: Transport>(
    session: &Session<T>,
    domain: &str,
    record_type: RecordType,
) -> Result<String, ResolutionError> {
    let name = parse_domain(domain)?;
    let nameservers = session.walk(domain, record_type).await?;

    let mut baseline: Option<NameserverAnswer> = None;
    let mut divergent: Option<NameserverAnswer> = None;

    for target in nameservers.iter().filter_map(ns_target) {
        let response = session
            .exchanger()
            .exchange(domain, &name, record_type, &target.to_string())
            .await?;
        let answer = NameserverAnswer {
            nameserver: display_host(target),
            values: sorted_values(domain, &response)?,
        };

        match &baseline {
            None => baseline = Some(answer),
            Some(first) => {
                if differs(&first.values, &answer.values) {
                    divergent = Some(answer);
                    break;
                }
            }
        }
    }

    let baseline = baseline.ok_or_else(|| ResolutionError::NoNameservers {
        domain: domain.to_string(),
    })?;
    Ok(format_line(domain, &baseline, divergent.as_ref()))
}

fn format_line(
    domain: &str,
    baseline: &NameserverAnswer,
    divergent: Option<&NameserverAnswer>,
) -> String {
    let mut line = format!(
        "{domain} {} {}@{}",
        divergent.is_some(),
        bracketed(&baseline.values),
        baseline.nameserver
    );
    if let Some(other) = divergent {
        line.push_str(&format!(" {}@{}", bracketed(&other.values), other.nameserver));
    }
    line
}
