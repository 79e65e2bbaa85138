use dashmap::DashMap;
use routewatch_domain::Identity;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-lifetime IP → identity map.
///
/// Entries are write-once: the first stored identity for an address wins and
/// every later `store` hands that same value back. There is no eviction.
#[derive(Default)]
pub struct IdentityCache {
    entries: DashMap<String, Identity>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, ip: &str) -> Option<Identity> {
        match self.entries.get(ip) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Returns the identity actually held for `ip` after the call.
    pub fn store(&self, ip: &str, identity: Identity) -> Identity {
        self.entries
            .entry(ip.to_string())
            .or_insert(identity)
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IdentityCacheStats {
        IdentityCacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
