//! Bounded, time-expiring cache in front of the catalog resolver.
//!
//! Built and warmed once at startup and shared through `AppState`. Reads do not
//! serialize; two callers racing on a cold key both compute the same value and
//! the second insert simply overwrites the first.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, info};

use crate::catalog::data::{CatalogDoc, PackDefinition, INDUSTRIES};
use crate::catalog::resolver::{
    compute_catalog_stats, list_documents, list_packs, resolve_documents_for_pack, CatalogStats,
};

pub const DEFAULT_MAX_ENTRIES: usize = 1000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Packs(String),
    Documents(String),
    PackDocuments { industry: String, pack: String },
    Stats,
}

#[derive(Debug, Clone)]
enum CachedValue {
    Packs(Vec<PackDefinition>),
    Documents(Vec<CatalogDoc>),
    Stats(CatalogStats),
}

#[derive(Debug)]
struct CacheEntry {
    value: CachedValue,
    inserted_at: Instant,
}

pub struct CatalogCache {
    entries: DashMap<CacheKey, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

impl CatalogCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    /// Populates every industry listing, every (industry, pack) resolution, and the stats.
    pub fn warm(&self) {
        for industry in INDUSTRIES {
            self.packs(industry.id);
            self.documents(industry.id);
            for pack in industry.packs {
                self.pack_documents(industry.id, pack.id);
            }
        }
        self.stats();
        info!("Catalog cache warmed with {} entries", self.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn packs(&self, industry: &str) -> Vec<PackDefinition> {
        let key = CacheKey::Packs(industry.to_string());
        if let Some(CachedValue::Packs(packs)) = self.lookup(&key) {
            return packs;
        }
        let packs = list_packs(industry);
        self.store(key, CachedValue::Packs(packs.clone()));
        packs
    }

    pub fn documents(&self, industry: &str) -> Vec<CatalogDoc> {
        let key = CacheKey::Documents(industry.to_string());
        if let Some(CachedValue::Documents(docs)) = self.lookup(&key) {
            return docs;
        }
        let docs = list_documents(industry);
        self.store(key, CachedValue::Documents(docs.clone()));
        docs
    }

    pub fn pack_documents(&self, industry: &str, pack: &str) -> Vec<CatalogDoc> {
        let key = CacheKey::PackDocuments {
            industry: industry.to_string(),
            pack: pack.to_string(),
        };
        if let Some(CachedValue::Documents(docs)) = self.lookup(&key) {
            return docs;
        }
        let docs = resolve_documents_for_pack(industry, pack);
        self.store(key, CachedValue::Documents(docs.clone()));
        docs
    }

    pub fn stats(&self) -> CatalogStats {
        if let Some(CachedValue::Stats(stats)) = self.lookup(&CacheKey::Stats) {
            return stats;
        }
        let stats = compute_catalog_stats();
        self.store(CacheKey::Stats, CachedValue::Stats(stats));
        stats
    }

    /// Fresh value for `key`. Expired entries are dropped here.
    fn lookup(&self, key: &CacheKey) -> Option<CachedValue> {
        if let Some(entry) = self.entries.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.value.clone());
            }
        }
        self.entries
            .remove_if(key, |_, entry| entry.inserted_at.elapsed() >= self.ttl);
        None
    }

    fn store(&self, key: CacheKey, value: CachedValue) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.inserted_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            debug!("Catalog cache full, evicting {key:?}");
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_warm_populates_every_lookup() {
        let cache = CatalogCache::default();
        assert!(cache.is_empty());
        cache.warm();
        assert!(!cache.is_empty());
        // 11 industries x (packs + documents) + 24 pack resolutions + stats
        assert_eq!(cache.len(), 47);
        assert_eq!(cache.pack_documents("construction-trades", "lite").len(), 5);
        assert_eq!(cache.len(), 47);
    }

    #[test]
    fn test_cached_values_match_resolver() {
        let cache = CatalogCache::default();
        assert_eq!(cache.documents("ndis"), list_documents("ndis"));
        assert_eq!(cache.documents("ndis"), list_documents("ndis"));
        assert_eq!(cache.packs("hospitality"), list_packs("hospitality"));
        assert_eq!(cache.stats(), compute_catalog_stats());
        assert!(cache.pack_documents("aviation", "lite").is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest_entry() {
        let cache = CatalogCache::new(2, DEFAULT_TTL);
        cache.packs("ndis");
        std::thread::sleep(Duration::from_millis(2));
        cache.packs("childcare");
        std::thread::sleep(Duration::from_millis(2));
        cache.packs("hospitality");

        assert_eq!(cache.len(), 2);
        assert!(!cache.entries.contains_key(&CacheKey::Packs("ndis".to_string())));
        assert!(cache.entries.contains_key(&CacheKey::Packs("hospitality".to_string())));
    }

    #[test]
    fn test_expired_entries_are_recomputed() {
        let cache = CatalogCache::new(10, Duration::ZERO);
        let first = cache.documents("childcare");
        let second = cache.documents("childcare");
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_readers_agree() {
        let cache = Arc::new(CatalogCache::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.pack_documents("ndis", "pro").len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 16);
        }
        assert_eq!(cache.len(), 1);
    }
}
