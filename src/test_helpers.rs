//! Scripted DNS fixtures shared by the unit tests.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use trust_dns_resolver::proto::op::{Message, MessageType, ResponseCode};
use trust_dns_resolver::proto::rr::rdata::{A, AAAA, CNAME, NS};
use trust_dns_resolver::proto::rr::{Name, RData, Record, RecordType};

use crate::config::ROOT_SERVER;
use crate::dns::{DelegationCache, Exchanger, Session, Transport};
use crate::error_handling::TransportError;

type Key = (String, String, RecordType);

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

fn key(nameserver: &str, qname: &str, record_type: RecordType) -> Key {
    (normalize(nameserver), normalize(qname), record_type)
}

#[derive(Default)]
struct Script {
    responses: HashMap<Key, Message>,
    failures: HashMap<String, usize>,
    calls: Vec<Key>,
}

/// In-memory `Transport` answering from a fixed script.
///
/// Responses are keyed by (nameserver, question name, record type); anything
/// unscripted times out. Clones share the script and the call log.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `qname`/`record_type` at `nameserver` with `response`.
    pub fn on(&self, nameserver: &str, qname: &str, record_type: RecordType, response: Message) {
        self.script
            .lock()
            .unwrap()
            .responses
            .insert(key(nameserver, qname, record_type), response);
    }

    /// Makes the next `count` queries to `nameserver` time out.
    pub fn fail_first(&self, nameserver: &str, count: usize) {
        self.script
            .lock()
            .unwrap()
            .failures
            .insert(normalize(nameserver), count);
    }

    /// Every query sent so far as (nameserver, qname, record type), without trailing dots.
    pub fn calls(&self) -> Vec<(String, String, RecordType)> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, query: &Message, nameserver: &str) -> Result<Message, TransportError> {
        let question = &query.queries()[0];
        let key = key(
            nameserver,
            &question.name().to_string(),
            question.query_type(),
        );

        let mut script = self.script.lock().unwrap();
        script.calls.push(key.clone());

        if let Some(remaining) = script.failures.get_mut(&key.0) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(TransportError::Timeout {
                    nameserver: nameserver.to_string(),
                });
            }
        }

        let mut response = script
            .responses
            .get(&key)
            .cloned()
            .ok_or_else(|| TransportError::Timeout {
                nameserver: nameserver.to_string(),
            })?;
        response
            .set_id(query.id())
            .set_message_type(MessageType::Response)
            .add_query(question.clone());
        Ok(response)
    }
}

pub fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

pub fn ns_record(zone: &str, target: &str) -> Record {
    Record::from_rdata(name(zone), 172800, RData::NS(NS(name(target))))
}

pub fn a_record(owner: &str, address: &str) -> Record {
    let address: Ipv4Addr = address.parse().unwrap();
    Record::from_rdata(name(owner), 300, RData::A(A(address)))
}

pub fn aaaa_record(owner: &str, address: &str) -> Record {
    let address: Ipv6Addr = address.parse().unwrap();
    Record::from_rdata(name(owner), 300, RData::AAAA(AAAA(address)))
}

pub fn cname_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

/// Non-authoritative referral to `zone` served by `nameservers`.
pub fn referral(zone: &str, nameservers: &[&str]) -> Message {
    let mut message = Message::new();
    for nameserver in nameservers {
        message.add_name_server(ns_record(zone, nameserver));
    }
    message
}

/// Authoritative NOERROR answer carrying the zone's NS set in the authority section.
pub fn authoritative(zone: &str, nameservers: &[&str], answers: Vec<Record>) -> Message {
    let mut message = referral(zone, nameservers);
    message.set_authoritative(true);
    for answer in answers {
        message.add_answer(answer);
    }
    message
}

pub fn with_rcode(mut message: Message, code: ResponseCode) -> Message {
    message.set_response_code(code);
    message
}

pub const IANA_SERVERS: [&str; 2] = ["a.iana-servers.net.", "b.iana-servers.net."];

/// Scripts root -> com. -> example.com. for `qname`, with both example.com.
/// nameservers answering `answers` authoritatively.
///
/// The root is asked for `root_type`; every later hop is asked for A.
pub fn script_example_com(
    transport: &ScriptedTransport,
    qname: &str,
    root_type: RecordType,
    answers: Vec<Record>,
) {
    transport.on(
        ROOT_SERVER,
        qname,
        root_type,
        referral("com.", &["a.gtld-servers.net."]),
    );
    transport.on(
        "a.gtld-servers.net.",
        qname,
        RecordType::A,
        referral("example.com.", &IANA_SERVERS),
    );
    for nameserver in IANA_SERVERS {
        transport.on(
            nameserver,
            qname,
            RecordType::A,
            authoritative("example.com.", &IANA_SERVERS, answers.clone()),
        );
    }
}

pub fn test_cache() -> DelegationCache {
    DelegationCache::new(1_000, Duration::from_secs(600))
}

pub fn session(
    transport: &ScriptedTransport,
    cache: Option<DelegationCache>,
) -> Session<ScriptedTransport> {
    Session::new(Exchanger::new(transport.clone(), cache), ROOT_SERVER)
}
