use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use wordfam_core::{CacheConfig, FamilyConfig, FamilyGraph, GraphCache, Node, WordMeta};
use wordfam_interfaces::FamilySummary;

fn graph(root: &str) -> Arc<FamilyGraph> {
    Arc::new(FamilyGraph {
        nodes: vec![Node {
            id: root.to_string(),
            label: root.to_string(),
            score: 1.0,
            definition: None,
        }],
        edges: Vec::new(),
        meta: WordMeta::default(),
        summary: FamilySummary::default(),
    })
}

fn cache(ttl_secs: u64, max_entries: usize) -> GraphCache {
    GraphCache::new(CacheConfig {
        ttl: Duration::from_secs(ttl_secs),
        max_entries,
    })
}

#[test]
fn test_config_from_family_config() {
    let config = CacheConfig::from(&FamilyConfig::default());
    assert_eq!(config, CacheConfig::default());
    assert_eq!(config.ttl, Duration::from_secs(3600));
    assert_eq!(config.max_entries, 1000);
}

#[tokio::test]
async fn test_get_normalizes_key() {
    let cache = cache(60, 10);
    let stored = graph("run");
    cache.insert("  Run", Arc::clone(&stored));

    let fetched = cache.get("RUN").unwrap();
    assert!(Arc::ptr_eq(&stored, &fetched));
    assert!(cache.get("walk").is_none());

    let metrics = cache.metrics();
    assert_eq!(metrics.hits, 1);
    assert_eq!(metrics.misses, 1);
    assert_eq!(metrics.insertions, 1);
    assert_eq!(metrics.entries, 1);
    assert_eq!(metrics.hit_ratio(), 0.5);
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire_after_ttl() {
    let cache = cache(60, 10);
    cache.insert("run", graph("run"));

    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(cache.get("run").is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get("run").is_none());
    assert!(cache.is_empty());
    assert_eq!(cache.metrics().expirations, 1);
}

#[tokio::test(start_paused = true)]
async fn test_put_with_explicit_ttl() {
    let cache = cache(3600, 10);
    cache.put("run", graph("run"), Duration::from_secs(5));

    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(cache.get("run").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_ttl_does_not_overflow() {
    let cache = cache(u64::MAX, 10);
    cache.insert("run", graph("run"));
    cache.put("walk", graph("walk"), Duration::MAX);

    tokio::time::advance(Duration::from_secs(86_400 * 365)).await;
    assert!(cache.get("run").is_some());
    assert!(cache.get("walk").is_some());
}

#[tokio::test]
async fn test_least_recently_used_entry_is_evicted() {
    let cache = cache(60, 2);
    cache.insert("run", graph("run"));
    cache.insert("walk", graph("walk"));

    // touch "run" so "walk" becomes the eviction candidate
    assert!(cache.get("run").is_some());
    cache.insert("jump", graph("jump"));

    assert_eq!(cache.len(), 2);
    assert!(cache.get("walk").is_none());
    assert!(cache.get("run").is_some());
    assert!(cache.get("jump").is_some());
    assert_eq!(cache.metrics().evictions, 1);
}

#[tokio::test]
async fn test_replacing_an_entry_is_not_an_eviction() {
    let cache = cache(60, 2);
    cache.insert("run", graph("run"));
    let replacement = graph("run");
    cache.insert("run", Arc::clone(&replacement));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.metrics().evictions, 0);
    assert!(Arc::ptr_eq(&cache.get("run").unwrap(), &replacement));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_and_writers() {
    let cache = Arc::new(cache(60, 100));
    let mut handles = Vec::new();

    for i in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            let word = format!("word{}", i % 4);
            for _ in 0..50 {
                cache.insert(&word, graph(&word));
                if let Some(found) = cache.get(&word) {
                    assert_eq!(found.nodes[0].id, word);
                }
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(cache.len(), 4);
    assert_eq!(cache.metrics().insertions, 400);
}
