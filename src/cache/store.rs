//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with recency tracking and
//! per-entry expiry.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, RecencyList, MAX_ID_LEN};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::handle::SharedValue;

// == MRU Cache ==
/// Bounded cache of shared value handles, kept in strict touch order.
///
/// Every add and every successful read moves the touched entry to the
/// front; when an add pushes the cache over capacity, the entry at the
/// back (least recently touched) is evicted.
///
/// The cache itself is not internally synchronized: the `&mut self`
/// receivers make one-writer-at-a-time a compile-time guarantee, and
/// embedders that share a cache across tasks wrap it in their own lock
/// (see [`crate::tasks::spawn_prune_task`]). The [`SharedValue`] handles
/// it stores are individually thread-safe once cloned out.
#[derive(Debug)]
pub struct MruCache<T> {
    /// Id-keyed storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Touch-order tracker
    recency: RecencyList,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<T> MruCache<T> {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_entries` entries.
    ///
    /// A capacity of zero is valid: every add then evicts the entry it
    /// just inserted, so the cache stays empty.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Maximum number of entries the cache will hold.
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    // == Add ==
    /// Stores a clone of `value` under `id` with an optional ttl in
    /// seconds.
    ///
    /// A `ttl_secs` of `None` means the entry never expires. A new id is
    /// inserted at the front of the touch order; an existing id has its
    /// handle replaced, its lifetime restarted and is moved to the front.
    /// If the insert pushes the cache over capacity, the least recently
    /// touched entry is evicted. At most one entry is evicted per call,
    /// since each call adds at most one net entry.
    ///
    /// Adding an empty handle is a no-op that still reports success:
    /// there is no point in caching a value that is not there.
    ///
    /// # Errors
    /// [`CacheError::IdTooLong`] if `id` exceeds [`MAX_ID_LEN`] bytes.
    /// The cache is left untouched on error.
    pub fn add(&mut self, id: &str, value: &SharedValue<T>, ttl_secs: Option<u64>) -> Result<()> {
        validate_id(id)?;

        if !value.has_value() {
            return Ok(());
        }

        match self.entries.get_mut(id) {
            Some(entry) => entry.replace(value.clone(), ttl_secs),
            None => {
                self.entries
                    .insert(id.to_string(), CacheEntry::new(value.clone(), ttl_secs));
            }
        }

        // Added or updated entries become the most recently used
        self.recency.touch(id);

        // Enforce the bound after insertion, so a zero-capacity cache
        // admits the entry and immediately drops it again
        if self.entries.len() > self.max_entries {
            if let Some(evicted_id) = self.recency.pop_least_recent() {
                self.entries.remove(&evicted_id);
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Get ==
    /// Retrieves a fresh clone of the handle stored under `id`.
    ///
    /// Returns `Ok(None)` for an unknown id. An expired entry also reads
    /// as `Ok(None)`: it stays in place with its touch order unchanged
    /// until [`MruCache::prune`] or eviction removes it. A successful read
    /// moves the entry to the front of the touch order.
    pub fn get(&mut self, id: &str) -> Result<Option<SharedValue<T>>> {
        self.lookup(id, false)
    }

    /// Like [`MruCache::get`], but expired entries are still returned and
    /// moved to the front.
    pub fn get_include_expired(&mut self, id: &str) -> Result<Option<SharedValue<T>>> {
        self.lookup(id, true)
    }

    fn lookup(&mut self, id: &str, include_expired: bool) -> Result<Option<SharedValue<T>>> {
        validate_id(id)?;

        let Some(entry) = self.entries.get(id) else {
            self.stats.record_miss();
            return Ok(None);
        };

        if !include_expired && entry.is_expired() {
            self.stats.record_miss();
            return Ok(None);
        }

        let value = entry.value().clone();
        self.recency.touch(id);
        self.stats.record_hit();
        Ok(Some(value))
    }

    // == Size ==
    /// Current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Ids ==
    /// Ids in touch order, most recently touched first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.recency.iter()
    }

    // == Prune ==
    /// Removes every expired entry, releasing its handle clone.
    ///
    /// Returns the number of entries removed. Unexpired entries keep
    /// their touch order.
    pub fn prune(&mut self) -> usize {
        let expired_ids: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired_ids {
            self.entries.remove(id);
            self.recency.remove(id);
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        expired_ids.len()
    }

    // == Clear ==
    /// Removes and releases every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.len() > MAX_ID_LEN {
        return Err(CacheError::IdTooLong { len: id.len() });
    }
    Ok(())
}
