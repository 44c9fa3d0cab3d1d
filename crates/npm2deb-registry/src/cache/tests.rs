//! Unit tests for metadata cache

use super::*;
use std::collections::HashMap;

fn create_test_metadata(name: &str) -> PackageMetadataResponse {
    PackageMetadataResponse {
        name: name.to_string(),
        description: None,
        dist_tags: HashMap::from([("latest".to_string(), "1.0.0".to_string())]),
        versions: HashMap::new(),
    }
}

#[test]
fn test_cache_entry_default_ttl() {
    let entry = CacheEntry::new(create_test_metadata("left-pad"));
    assert_eq!(entry.ttl, Duration::from_secs(600));
    assert!(entry.is_fresh());
}

#[test]
fn test_cache_entry_zero_ttl_is_stale() {
    let entry = CacheEntry::with_ttl(create_test_metadata("left-pad"), Duration::ZERO);
    assert!(!entry.is_fresh());
}

#[test]
fn test_insert_and_get() {
    let cache = MetadataCache::new();
    cache.insert("left-pad".to_string(), create_test_metadata("left-pad"));

    let retrieved = cache.get("left-pad");
    assert_eq!(retrieved.map(|m| m.name), Some("left-pad".to_string()));
    assert!(cache.get("right-pad").is_none());
}

#[test]
fn test_stale_entry_is_evicted_on_get() {
    let cache = MetadataCache::new();
    cache.insert_with_ttl("old".to_string(), create_test_metadata("old"), Duration::ZERO);

    assert!(cache.get("old").is_none());
    assert_eq!(cache.stats().total_entries, 0);
}

#[test]
fn test_stats_and_cleanup() {
    let cache = MetadataCache::new();
    cache.insert("fresh".to_string(), create_test_metadata("fresh"));
    cache.insert_with_ttl("stale".to_string(), create_test_metadata("stale"), Duration::ZERO);

    assert_eq!(
        cache.stats(),
        CacheStats {
            total_entries: 2,
            fresh_entries: 1,
            stale_entries: 1,
        }
    );

    assert_eq!(cache.cleanup(), 1);
    assert_eq!(cache.stats().total_entries, 1);

    cache.clear();
    assert_eq!(cache.stats().total_entries, 0);
}
