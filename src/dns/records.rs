//! Record and message helpers.
//!
//! Small accessors over `trust-dns-proto` messages shared by the walker and
//! the resolution modes.

use trust_dns_resolver::proto::op::{Message, ResponseCode};
use trust_dns_resolver::proto::rr::{Name, RData, Record};

/// Anchors a domain at the root by appending the trailing dot when missing.
pub fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

/// Hostname form of a nameserver name, as printed in `statusdiff`/`responsediff`.
pub fn display_host(name: &Name) -> String {
    let text = name.to_string();
    match text.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => text,
    }
}

/// Target of an NS record, `None` for any other record.
pub fn ns_target(record: &Record) -> Option<&Name> {
    match record.data() {
        Some(RData::NS(ns)) => Some(&ns.0),
        _ => None,
    }
}

/// NS records of the authority section, in the order they were received.
pub fn ns_records(message: &Message) -> Vec<Record> {
    message
        .name_servers()
        .iter()
        .filter(|record| ns_target(record).is_some())
        .cloned()
        .collect()
}

/// First NS record of the authority section.
pub fn first_ns(message: &Message) -> Option<&Record> {
    message
        .name_servers()
        .iter()
        .find(|record| ns_target(record).is_some())
}

/// Where the delegation in `message` starts: the owner of its first NS record.
///
/// Responses carrying only an SOA in the authority section (typical for
/// NXDOMAIN/NODATA) have no zone cut.
pub fn zone_cut(message: &Message) -> Option<String> {
    first_ns(message).map(|record| record.name().to_string().to_ascii_lowercase())
}

/// Textual RCODE as printed by `statusdiff`.
pub fn rcode_text(code: ResponseCode) -> String {
    match code {
        ResponseCode::NoError => "NOERROR".to_string(),
        ResponseCode::FormErr => "FORMERR".to_string(),
        ResponseCode::ServFail => "SERVFAIL".to_string(),
        ResponseCode::NXDomain => "NXDOMAIN".to_string(),
        ResponseCode::NotImp => "NOTIMP".to_string(),
        ResponseCode::Refused => "REFUSED".to_string(),
        ResponseCode::YXDomain => "YXDOMAIN".to_string(),
        ResponseCode::YXRRSet => "YXRRSET".to_string(),
        ResponseCode::NXRRSet => "NXRRSET".to_string(),
        ResponseCode::NotAuth => "NOTAUTH".to_string(),
        ResponseCode::NotZone => "NOTZONE".to_string(),
        other => format!("RCODE{}", u16::from(other)),
    }
}

/// Address or alias carried by an answer record, `None` for any other kind.
pub fn answer_value(record: &Record) -> Option<String> {
    match record.data() {
        Some(RData::A(a)) => Some(a.0.to_string()),
        Some(RData::AAAA(aaaa)) => Some(aaaa.0.to_string()),
        Some(RData::CNAME(cname)) => Some(cname.0.to_string()),
        _ => None,
    }
}
