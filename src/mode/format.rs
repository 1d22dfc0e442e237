//! Output line formatting.

use trust_dns_resolver::proto::op::Message;
use trust_dns_resolver::proto::rr::RData;

/// Space-separated list in brackets, e.g. `[192.0.2.1 192.0.2.2]`.
pub fn bracketed(values: &[String]) -> String {
    format!("[{}]", values.join(" "))
}

/// Formats an address answer as `<question>><cname targets...>[<sorted addresses>]`.
///
/// CNAME targets keep the order of the answer section; addresses are sorted
/// lexicographically so the same set always prints the same way. Records other
/// than A, AAAA and CNAME are shown as `UNKNOWN-RECORD-TYPE`.
pub fn pretty_print(message: &Message) -> String {
    let mut line = String::new();
    if let Some(question) = message.queries().first() {
        line.push_str(&question.name().to_string());
        line.push('>');
    }

    let mut addresses = Vec::new();
    for record in message.answers() {
        match record.data() {
            Some(RData::CNAME(cname)) => line.push_str(&cname.0.to_string()),
            Some(RData::A(a)) => addresses.push(a.0.to_string()),
            Some(RData::AAAA(aaaa)) => addresses.push(aaaa.0.to_string()),
            _ => line.push_str("UNKNOWN-RECORD-TYPE"),
        }
    }

    addresses.sort();
    line.push_str(&bracketed(&addresses));
    line
}
