//! In-memory result cache
//!
//! Built graphs keyed by normalized root word, with a TTL per entry and an LRU
//! bound on the number of entries.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use wordfam_interfaces::{normalize_word, FamilyGraph};

use crate::config::FamilyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of an entry
    pub ttl: Duration,
    /// Maximum number of entries before the least recently used is evicted
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_entries: 1000,
        }
    }
}

impl From<&FamilyConfig> for CacheConfig {
    fn from(config: &FamilyConfig) -> Self {
        Self {
            ttl: config.cache_ttl(),
            max_entries: config.cache_max_entries,
        }
    }
}

/// Cache counters, as reported by the health endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub insertions: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheMetrics {
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

struct CacheEntry {
    graph: Arc<FamilyGraph>,
    expires_at: Instant,
}

struct CacheState {
    entries: LruCache<String, CacheEntry>,
    metrics: CacheMetrics,
}

/// Thread-safe graph cache.
///
/// Readers get either no entry or a complete `Arc<FamilyGraph>`; entries are
/// never mutated in place.
pub struct GraphCache {
    state: Mutex<CacheState>,
    config: CacheConfig,
}

/// Roughly thirty years; stands in for TTLs past the clock's range
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn expiry_after(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE)
}

impl GraphCache {
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                metrics: CacheMetrics {
                    capacity: capacity.get(),
                    ..Default::default()
                },
            }),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the cached graph for `word` unless it is missing or expired
    pub fn get(&self, word: &str) -> Option<Arc<FamilyGraph>> {
        let key = normalize_word(word);
        let now = Instant::now();
        let mut state = self.state.lock();

        let live = state
            .entries
            .get(&key)
            .map(|entry| (entry.expires_at > now).then(|| Arc::clone(&entry.graph)));

        match live {
            Some(Some(graph)) => {
                state.metrics.hits += 1;
                Some(graph)
            }
            Some(None) => {
                state.entries.pop(&key);
                state.metrics.expirations += 1;
                state.metrics.misses += 1;
                debug!(word = %key, "Cache entry expired");
                None
            }
            None => {
                state.metrics.misses += 1;
                None
            }
        }
    }

    /// Stores `graph` under `word` for `ttl`, replacing any previous entry
    pub fn put(&self, word: &str, graph: Arc<FamilyGraph>, ttl: Duration) {
        let key = normalize_word(word);
        let entry = CacheEntry {
            graph,
            expires_at: expiry_after(ttl),
        };
        let mut state = self.state.lock();
        state.metrics.insertions += 1;
        if let Some((evicted, _)) = state.entries.push(key.clone(), entry) {
            if evicted != key {
                state.metrics.evictions += 1;
                debug!(word = %evicted, "Evicted least recently used cache entry");
            }
        }
    }

    /// Stores `graph` with the configured TTL
    pub fn insert(&self, word: &str, graph: Arc<FamilyGraph>) {
        self.put(word, graph, self.config.ttl);
    }

    pub fn metrics(&self) -> CacheMetrics {
        let state = self.state.lock();
        CacheMetrics {
            entries: state.entries.len(),
            ..state.metrics.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
