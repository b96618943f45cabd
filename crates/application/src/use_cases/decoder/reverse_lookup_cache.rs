use crate::ports::HostnameResolver;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Duration;
use tapguard_domain::{format_address, parse_address};
use tokio::time::Instant;
use tracing::debug;

struct CacheEntry {
    hostname: String,
    resolved_at: Instant,
}

/// Client IP → hostname cache with a freshness window.
///
/// Owned by the decode loop alone; `lookup` takes `&mut self` and there is
/// no interior locking. Sharing it between tasks needs an owner in front.
pub struct ReverseLookupCache {
    resolver: Arc<dyn HostnameResolver>,
    ttl: Duration,
    entries: FxHashMap<String, CacheEntry>,
}

impl ReverseLookupCache {
    pub fn new(resolver: Arc<dyn HostnameResolver>, ttl: Duration) -> Self {
        Self {
            resolver,
            ttl,
            entries: FxHashMap::default(),
        }
    }

    /// Hostname for the raw address bytes of a dnstap message.
    ///
    /// Empty input returns an empty string and touches nothing. A failed
    /// resolution keeps whatever entry exists, stale or not; with no entry
    /// the literal address is cached instead.
    pub async fn lookup(&mut self, ip_bytes: &[u8]) -> String {
        if ip_bytes.is_empty() {
            return String::new();
        }

        let key = format_address(ip_bytes);
        if let Some(entry) = self.entries.get(&key) {
            if entry.resolved_at.elapsed() < self.ttl {
                return entry.hostname.clone();
            }
        }

        match self.resolve(ip_bytes).await {
            Some(hostname) => {
                self.entries.insert(
                    key,
                    CacheEntry {
                        hostname: hostname.clone(),
                        resolved_at: Instant::now(),
                    },
                );
                hostname
            }
            None => {
                let entry = self.entries.entry(key).or_insert_with_key(|key| CacheEntry {
                    hostname: key.clone(),
                    resolved_at: Instant::now(),
                });
                entry.hostname.clone()
            }
        }
    }

    async fn resolve(&self, ip_bytes: &[u8]) -> Option<String> {
        let ip = parse_address(ip_bytes)?;
        match self.resolver.resolve_hostname(ip).await {
            Ok(Some(hostname)) => Some(hostname),
            Ok(None) => {
                debug!(ip = %ip, "No PTR record for client");
                None
            }
            Err(e) => {
                debug!(ip = %ip, error = %e, "Reverse lookup failed");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
