//! Delegation cache.
//!
//! Maps a zone name (the owner of the NS records defining a zone cut) to the
//! response observed at that cut, so later walks can skip the upper part of
//! the tree. Entries expire on a fixed window, independent of record TTLs.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use trust_dns_resolver::proto::op::Message;

use super::records::{fqdn, zone_cut};

/// Concurrent zone-cut cache shared by all workers.
///
/// Cloning is cheap and every clone refers to the same underlying store.
/// Concurrent writes to the same zone are last-write-wins.
#[derive(Clone)]
pub struct DelegationCache {
    entries: Cache<String, Arc<Message>>,
}

impl DelegationCache {
    /// Creates a cache whose entries expire `time_to_live` after they were written.
    ///
    /// Reads never extend or shorten an entry's lifetime.
    pub fn new(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }

    /// Stores `message` as the response seen at `zone`, replacing any previous entry.
    pub fn store(&self, zone: &str, message: Message) {
        let key = fqdn(&zone.to_ascii_lowercase());
        log::trace!("caching zone cut {key}");
        self.entries.insert(key, Arc::new(message));
    }

    /// Stores `message` under its own zone cut. Responses without an NS record
    /// in the authority section are not a zone cut and are never cached.
    pub fn store_response(&self, message: &Message) -> Option<String> {
        let zone = zone_cut(message)?;
        self.store(&zone, message.clone());
        Some(zone)
    }

    /// Finds the cached response for the longest suffix of `domain`.
    ///
    /// Candidates run from the full name down to the top-level label; the root
    /// itself is never a candidate. Returns the matching zone with its response.
    pub fn lookup(&self, domain: &str) -> Option<(String, Arc<Message>)> {
        let name = fqdn(&domain.to_ascii_lowercase());
        let labels: Vec<&str> = name
            .trim_end_matches('.')
            .split('.')
            .filter(|label| !label.is_empty())
            .collect();

        for start in 0..labels.len() {
            let candidate = fqdn(&labels[start..].join("."));
            if let Some(message) = self.entries.get(&candidate) {
                return Some((candidate, message));
            }
        }
        None
    }

    /// Number of live entries (approximate until pending maintenance runs).
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl std::fmt::Debug for DelegationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegationCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_dns_resolver::proto::rr::rdata::NS;
    use trust_dns_resolver::proto::rr::{Name, RData, Record};

    fn referral(zone: &str, nameserver: &str) -> Message {
        let mut message = Message::new();
        message.add_name_server(Record::from_rdata(
            Name::from_ascii(zone).unwrap(),
            172800,
            RData::NS(NS(Name::from_ascii(nameserver).unwrap())),
        ));
        message
    }

    fn cache() -> DelegationCache {
        DelegationCache::new(1_000, Duration::from_secs(600))
    }

    #[test]
    fn test_lookup_prefers_longest_suffix() {
        let cache = cache();
        cache.store("example.com.", referral("example.com.", "ns1.example.com."));
        cache.store("b.example.com.", referral("b.example.com.", "ns.b.example.com."));

        let (zone, _) = cache.lookup("a.b.example.com.").unwrap();
        assert_eq!(zone, "b.example.com.");

        let (zone, _) = cache.lookup("c.example.com").unwrap();
        assert_eq!(zone, "example.com.");
    }

    #[test]
    fn test_lookup_matches_full_name() {
        let cache = cache();
        cache.store("example.com.", referral("example.com.", "ns1.example.com."));
        let (zone, _) = cache.lookup("example.com").unwrap();
        assert_eq!(zone, "example.com.");
    }

    #[test]
    fn test_lookup_misses_unrelated_names() {
        let cache = cache();
        cache.store("example.com.", referral("example.com.", "ns1.example.com."));
        assert!(cache.lookup("example.org").is_none());
        // A shared label suffix that is not a label boundary must not match
        assert!(cache.lookup("notexample.com").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let cache = cache();
        cache.store("Example.COM.", referral("example.com.", "ns1.example.com."));
        assert!(cache.lookup("WWW.example.com").is_some());
    }

    #[test]
    fn test_store_response_requires_ns_record() {
        let cache = cache();
        assert!(cache.store_response(&Message::new()).is_none());
        assert!(cache.lookup("example.com").is_none());

        let zone = cache.store_response(&referral("com.", "a.gtld-servers.net."));
        assert_eq!(zone.as_deref(), Some("com."));
        let (zone, message) = cache.lookup("example.com").unwrap();
        assert_eq!(zone, "com.");
        assert_eq!(message.name_servers().len(), 1);
    }

    #[test]
    fn test_store_overwrites_existing_entry() {
        let cache = cache();
        cache.store("com.", referral("com.", "a.gtld-servers.net."));
        cache.store("com.", referral("com.", "b.gtld-servers.net."));
        let (_, message) = cache.lookup("example.com").unwrap();
        let target = crate::dns::records::ns_target(&message.name_servers()[0]).unwrap();
        assert_eq!(target.to_string(), "b.gtld-servers.net.");
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_expired_entries_are_not_returned() {
        let cache = DelegationCache::new(1_000, Duration::from_millis(20));
        cache.store("com.", referral("com.", "a.gtld-servers.net."));
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.lookup("example.com").is_none());
    }

    #[test]
    fn test_unread_entries_live_for_the_whole_window() {
        let cache = DelegationCache::new(1_000, Duration::from_millis(400));
        cache.store("com.", referral("com.", "a.gtld-servers.net."));

        // Idle for most of the window, then still served
        std::thread::sleep(Duration::from_millis(250));
        assert!(cache.lookup("example.com").is_some());

        // Reading does not extend the window
        std::thread::sleep(Duration::from_millis(250));
        assert!(cache.lookup("example.com").is_none());
    }

    #[test]
    fn test_concurrent_writes_do_not_corrupt() {
        let cache = cache();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        let zone = format!("zone{}.example.", (i + j) % 10);
                        cache.store(&zone, referral(&zone, "ns.example."));
                        let _ = cache.lookup(&format!("www.{zone}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.entry_count(), 10);
    }
}
