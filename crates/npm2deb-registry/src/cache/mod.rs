//! Metadata caching with TTL support
//!
//! A diamond in the dependency graph asks for the same module more than
//! once per run; the cache keeps those repeats off the network.

use std::time::{Duration, SystemTime};

use dashmap::DashMap;

use crate::api::PackageMetadataResponse;

/// Default time-to-live of a cached document
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Cache entry with TTL
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cached metadata
    pub metadata: PackageMetadataResponse,
    /// When the entry was stored
    pub stored_at: SystemTime,
    /// Time-to-live duration
    pub ttl: Duration,
}

impl CacheEntry {
    /// Create new cache entry with the default TTL (10 minutes)
    pub fn new(metadata: PackageMetadataResponse) -> Self {
        Self::with_ttl(metadata, DEFAULT_TTL)
    }

    /// Create cache entry with custom TTL
    pub fn with_ttl(metadata: PackageMetadataResponse, ttl: Duration) -> Self {
        Self {
            metadata,
            stored_at: SystemTime::now(),
            ttl,
        }
    }

    /// Check if cache entry is still fresh
    pub fn is_fresh(&self) -> bool {
        match self.stored_at.elapsed() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => false, // Clock went backwards, consider stale
        }
    }
}

/// In-memory metadata cache with TTL
#[derive(Debug, Default)]
pub struct MetadataCache {
    cache: DashMap<String, CacheEntry>,
}

impl MetadataCache {
    /// Create new metadata cache
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Get cached metadata if fresh
    pub fn get(&self, module: &str) -> Option<PackageMetadataResponse> {
        let fresh = {
            let entry = self.cache.get(module)?;
            entry.is_fresh().then(|| entry.metadata.clone())
        };

        if fresh.is_none() {
            self.cache.remove(module);
        }
        fresh
    }

    /// Store metadata with default TTL
    pub fn insert(&self, module: String, metadata: PackageMetadataResponse) {
        self.cache.insert(module, CacheEntry::new(metadata));
    }

    /// Store metadata with custom TTL
    pub fn insert_with_ttl(
        &self,
        module: String,
        metadata: PackageMetadataResponse,
        ttl: Duration,
    ) {
        self.cache.insert(module, CacheEntry::with_ttl(metadata, ttl));
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let fresh_entries = self.cache.iter().filter(|entry| entry.is_fresh()).count();

        CacheStats {
            total_entries: self.cache.len(),
            fresh_entries,
            stale_entries: self.cache.len() - fresh_entries,
        }
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Remove stale entries, returning how many were dropped
    pub fn cleanup(&self) -> usize {
        let before = self.cache.len();
        self.cache.retain(|_, entry| entry.is_fresh());
        before - self.cache.len()
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of fresh entries
    pub fresh_entries: usize,
    /// Number of stale entries
    pub stale_entries: usize,
}

#[cfg(test)]
mod tests;
