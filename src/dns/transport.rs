//! Single-attempt DNS transport.
//!
//! A `Transport` sends one query to one nameserver and returns whatever came
//! back. Retries and caching live one level up, in `Exchanger`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use trust_dns_resolver::proto::op::Message;
use trust_dns_resolver::proto::serialize::binary::BinEncodable;
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::{DNS_PORT, MAX_UDP_RESPONSE_SIZE};
use crate::error_handling::TransportError;

use super::records::fqdn;

/// Sends one DNS query to one nameserver.
///
/// `nameserver` is whatever the caller knows the server by: an IP address,
/// an `ip:port` pair, or a hostname taken from an NS record.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, query: &Message, nameserver: &str) -> Result<Message, TransportError>;
}

/// Plain UDP transport.
///
/// Every attempt uses a fresh ephemeral socket connected to the nameserver, so
/// a late answer to an earlier attempt can never be mistaken for the current one.
/// Nameserver hostnames are resolved through the system resolver configuration.
pub struct UdpTransport {
    resolver: Arc<TokioAsyncResolver>,
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(resolver: Arc<TokioAsyncResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Socket address for `nameserver`, looking hostnames up when needed.
    async fn nameserver_addr(&self, nameserver: &str) -> Result<SocketAddr, TransportError> {
        if let Some(addr) = parse_socket_addr(nameserver) {
            return Ok(addr);
        }

        // Fully qualified so the system search list is never appended
        let host = fqdn(nameserver);
        let lookup = self.resolver.lookup_ip(host.as_str()).await.map_err(|source| {
            TransportError::NameserverLookup {
                nameserver: nameserver.to_string(),
                source,
            }
        })?;
        let ip = lookup
            .iter()
            .next()
            .ok_or_else(|| TransportError::NoAddress {
                nameserver: nameserver.to_string(),
            })?;
        Ok(SocketAddr::new(ip, DNS_PORT))
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, query: &Message, nameserver: &str) -> Result<Message, TransportError> {
        let io_err = |source| TransportError::Io {
            nameserver: nameserver.to_string(),
            source,
        };
        let malformed = |source| TransportError::Malformed {
            nameserver: nameserver.to_string(),
            source,
        };

        let addr = self.nameserver_addr(nameserver).await?;
        let local: SocketAddr = match addr {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };

        let socket = UdpSocket::bind(local).await.map_err(io_err)?;
        socket.connect(addr).await.map_err(io_err)?;

        let bytes = query.to_bytes().map_err(malformed)?;
        socket.send(&bytes).await.map_err(io_err)?;

        let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let len = tokio::time::timeout(self.timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout {
                nameserver: nameserver.to_string(),
            })?
            .map_err(io_err)?;

        let response = Message::from_vec(&buf[..len]).map_err(malformed)?;
        if response.id() != query.id() {
            return Err(TransportError::IdMismatch {
                nameserver: nameserver.to_string(),
                expected: query.id(),
                received: response.id(),
            });
        }
        Ok(response)
    }
}

/// Parses `ip`, `ip:port` and `[v6]:port`; hostnames yield `None`.
pub fn parse_socket_addr(nameserver: &str) -> Option<SocketAddr> {
    if let Ok(addr) = nameserver.parse::<SocketAddr>() {
        return Some(addr);
    }
    nameserver
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}
