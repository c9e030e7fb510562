//! Error types for the cache crate
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache and handle operations.
///
/// Failures are surfaced synchronously to the caller and never retried
/// internally. An operation that returns an error leaves the cache (or the
/// handle's reference count) exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Entry id exceeds the maximum length
    #[error("cache id of {len} bytes exceeds the 300 byte limit")]
    IdTooLong {
        /// Byte length of the rejected id
        len: usize,
    },

    /// The payload lock of a shared value was poisoned by a panicking holder
    #[error("shared value lock poisoned")]
    Poisoned,
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
