// Shared test fixtures: a scripted in-memory DNS transport and message builders.
//
// Included with `mod helpers;` from the integration test files that need it.

#![allow(dead_code)] // Not every test file uses every helper

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use delegation_probe::{Transport, TransportError};
use trust_dns_resolver::proto::op::{Message, MessageType, ResponseCode};
use trust_dns_resolver::proto::rr::rdata::{A, CNAME, NS};
use trust_dns_resolver::proto::rr::{Name, RData, Record, RecordType};

pub const ROOT: &str = "192.36.148.17";
pub const IANA: [&str; 2] = ["a.iana-servers.net.", "b.iana-servers.net."];

type Key = (String, String, RecordType);

fn key(nameserver: &str, qname: &str, record_type: RecordType) -> Key {
    (
        nameserver.trim_end_matches('.').to_ascii_lowercase(),
        qname.trim_end_matches('.').to_ascii_lowercase(),
        record_type,
    )
}

/// Answers from a fixed table; unscripted queries time out.
#[derive(Clone, Default)]
pub struct FakeDns {
    responses: Arc<Mutex<HashMap<Key, Message>>>,
    queries: Arc<Mutex<Vec<Key>>>,
}

impl FakeDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, nameserver: &str, qname: &str, record_type: RecordType, response: Message) {
        self.responses
            .lock()
            .unwrap()
            .insert(key(nameserver, qname, record_type), response);
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeDns {
    async fn send(&self, query: &Message, nameserver: &str) -> Result<Message, TransportError> {
        let question = query.queries()[0].clone();
        let key = key(nameserver, &question.name().to_string(), question.query_type());
        self.queries.lock().unwrap().push(key.clone());

        let scripted = self.responses.lock().unwrap().get(&key).cloned();
        let mut response = scripted.ok_or_else(|| TransportError::Timeout {
            nameserver: nameserver.to_string(),
        })?;
        response
            .set_id(query.id())
            .set_message_type(MessageType::Response)
            .add_query(question);
        Ok(response)
    }
}

pub fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

pub fn a(owner: &str, address: &str) -> Record {
    let address: Ipv4Addr = address.parse().unwrap();
    Record::from_rdata(name(owner), 300, RData::A(A(address)))
}

pub fn cname(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

pub fn referral(zone: &str, nameservers: &[&str]) -> Message {
    let mut message = Message::new();
    for nameserver in nameservers {
        message.add_name_server(Record::from_rdata(
            name(zone),
            172800,
            RData::NS(NS(name(nameserver))),
        ));
    }
    message
}

pub fn answer(zone: &str, nameservers: &[&str], code: ResponseCode, records: &[Record]) -> Message {
    let mut message = referral(zone, nameservers);
    message.set_authoritative(true).set_response_code(code);
    for record in records {
        message.add_answer(record.clone());
    }
    message
}

/// root -> com. -> example.com. for `qname`; each IANA server answers with its own RCODE.
pub fn example_zone(dns: &FakeDns, qname: &str, codes: [ResponseCode; 2], records: &[Record]) {
    dns.on(ROOT, qname, RecordType::A, referral("com.", &["a.gtld-servers.net."]));
    dns.on(
        "a.gtld-servers.net.",
        qname,
        RecordType::A,
        referral("example.com.", &IANA),
    );
    for (nameserver, code) in IANA.iter().zip(codes) {
        dns.on(
            nameserver,
            qname,
            RecordType::A,
            answer("example.com.", &IANA, code, records),
        );
    }
}

/// Runs the pipeline over `input` with a fake transport and returns the output lines, sorted.
pub async fn run_lines(
    config: &delegation_probe::Config,
    dns: &FakeDns,
    input: &'static str,
) -> (Vec<String>, delegation_probe::RunReport) {
    let mut output = Vec::new();
    let report = delegation_probe::run_with(config, || dns.clone(), input.as_bytes(), &mut output)
        .await
        .unwrap();
    let mut lines: Vec<String> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    (lines, report)
}
