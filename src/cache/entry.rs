//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiry support.

use std::time::{Duration, Instant};

use crate::handle::SharedValue;

// == Cache Entry ==
/// A single cache entry: a shared value handle plus expiry metadata.
#[derive(Debug)]
pub struct CacheEntry<T> {
    /// Handle clone owned by this entry
    value: SharedValue<T>,
    /// Instant the entry was created or last updated
    created_at: Instant,
    /// Lifetime in seconds; `None` means the entry never expires
    ttl_secs: Option<u64>,
}

impl<T> CacheEntry<T> {
    pub(crate) fn new(value: SharedValue<T>, ttl_secs: Option<u64>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl_secs,
        }
    }

    /// Replaces the stored handle and restarts the entry's lifetime.
    ///
    /// Dropping the previous handle clone here releases the entry's
    /// reference to the old value.
    pub(crate) fn replace(&mut self, value: SharedValue<T>, ttl_secs: Option<u64>) {
        self.value = value;
        self.created_at = Instant::now();
        self.ttl_secs = ttl_secs;
    }

    /// Handle to the stored value.
    pub fn value(&self) -> &SharedValue<T> {
        &self.value
    }

    /// Time elapsed since the entry was created or last updated.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its ttl.
    ///
    /// An entry without a ttl never expires. Otherwise the entry is
    /// expired once its age strictly exceeds the ttl, so a ttl of zero
    /// keeps the entry valid only for the instant it was stamped.
    pub fn is_expired(&self) -> bool {
        match self.ttl_secs {
            Some(ttl) => self.age().as_secs_f64() > ttl as f64,
            None => false,
        }
    }
}
