//! MRU Cache - a bounded most-recently-used cache with shared value
//! handles.
//!
//! Entries are kept in strict touch order: every add and every successful
//! read moves the touched entry to the front, and crossing the capacity
//! bound evicts the entry at the back. Each entry carries an optional
//! per-entry expiry, applied lazily on read and eagerly by
//! [`MruCache::prune`].
//!
//! Values are stored behind reference-counted [`SharedValue`] handles, so
//! a retrieved value stays alive for its holders even after the cache
//! evicts or clears the entry it came from.

pub mod cache;
pub mod config;
pub mod error;
pub mod handle;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, MruCache, RecencyList, MAX_ID_LEN};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use handle::SharedValue;
pub use tasks::spawn_prune_task;
