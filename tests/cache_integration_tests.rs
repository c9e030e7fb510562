//! Integration Tests for the Cache
//!
//! Exercises the public crate surface end-to-end: shared value lifetimes
//! across cache eviction, expiry handling over real time, concurrent
//! readers, and the background prune task.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::RwLock;

use mru_cache::{spawn_prune_task, CacheConfig, MruCache, SharedValue};

// == Helper Functions ==

fn handle(payload: &str) -> SharedValue<String> {
    SharedValue::new(payload.to_string(), drop)
}

fn counted_handle(payload: &str, disposals: &Arc<AtomicUsize>) -> SharedValue<String> {
    let counter = Arc::clone(disposals);
    SharedValue::new(payload.to_string(), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// == Value Lifetime Tests ==

#[test]
fn test_retrieved_value_outlives_eviction_and_cache() {
    let disposals = Arc::new(AtomicUsize::new(0));

    let mut cache = MruCache::new(1);
    let value = counted_handle("payload", &disposals);

    cache.add("a", &value, None).unwrap();
    let retrieved = cache.get("a").unwrap().expect("entry present");
    drop(value);

    // Evict "a", then destroy the cache entirely
    cache.add("b", &handle("other"), None).unwrap();
    drop(cache);

    // The retrieved clone alone keeps the payload alive
    assert_eq!(disposals.load(Ordering::SeqCst), 0);
    assert_eq!(retrieved.value().unwrap().as_deref(), Some("payload"));

    drop(retrieved);
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_readers_while_cache_mutates() {
    let disposals = Arc::new(AtomicUsize::new(0));

    let mut cache = MruCache::new(10);
    cache
        .add("shared", &counted_handle("payload", &disposals), None)
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let value = cache.get("shared").unwrap().expect("entry present");
            thread::spawn(move || {
                for _ in 0..200 {
                    let clone = value.clone();
                    assert_eq!(
                        clone.with_value(|p| p.len()).unwrap(),
                        Some("payload".len())
                    );
                }
            })
        })
        .collect();

    // Mutating the cache under the readers' feet must not free the value
    cache.clear();
    assert!(cache.is_empty());

    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

// == Expiry Tests ==

#[test]
fn test_expiry_window_end_to_end() {
    let mut cache = MruCache::new(10);

    cache.add("a", &handle("va"), Some(1)).unwrap();

    // Within the expiry window the entry is readable
    assert!(cache.get("a").unwrap().is_some());

    thread::sleep(Duration::from_millis(1100));

    // Past the window: invisible to get, still there for the expired view
    assert!(cache.get("a").unwrap().is_none());
    assert!(cache.get_include_expired("a").unwrap().is_some());
    assert_eq!(cache.len(), 1);

    // Prune finally drops it
    assert_eq!(cache.prune(), 1);
    assert_eq!(cache.len(), 0);
    assert!(cache.get_include_expired("a").unwrap().is_none());
}

// == Background Prune Task ==

#[tokio::test]
async fn test_shared_cache_with_prune_task() {
    let cache = Arc::new(RwLock::new(MruCache::new(100)));

    {
        let mut guard = cache.write().await;
        guard.add("fleeting", &handle("v1"), Some(0)).unwrap();
        guard.add("durable", &handle("v2"), None).unwrap();
    }

    let task = spawn_prune_task(cache.clone(), 1);
    tokio::time::sleep(Duration::from_millis(1500)).await;

    {
        let mut guard = cache.write().await;
        assert!(guard.get("fleeting").unwrap().is_none());
        assert!(guard.get("durable").unwrap().is_some());
        assert_eq!(guard.len(), 1);
        assert_eq!(guard.stats().expirations, 1);
    }

    task.abort();
}

// == Configuration and Stats ==

#[test]
fn test_cache_from_config_applies_capacity() {
    let config = CacheConfig {
        max_entries: 2,
        prune_interval: 60,
    };
    let mut cache = MruCache::from_config(&config);

    cache.add("a", &handle("va"), None).unwrap();
    cache.add("b", &handle("vb"), None).unwrap();
    cache.add("c", &handle("vc"), None).unwrap();

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.ids().collect::<Vec<_>>(), vec!["c", "b"]);
}

#[test]
fn test_stats_snapshot_serializes() {
    let mut cache = MruCache::new(10);

    cache.add("a", &handle("va"), None).unwrap();
    cache.get("a").unwrap();
    cache.get("missing").unwrap();

    let json = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
}
