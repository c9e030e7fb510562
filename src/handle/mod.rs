//! Shared Value Handle Module
//!
//! Reference-counted, thread-safe ownership of cached payloads.
//!
//! The cache stores one [`SharedValue`] clone per entry and hands out fresh
//! clones on retrieval, so a value stays alive for its holders even after
//! the cache evicts or clears the entry it came from.

mod shared;

pub use shared::SharedValue;
