//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a shared
//! cache.
//!
//! # Tasks
//! - Expiry prune: removes expired cache entries at configured intervals

mod prune;

pub use prune::spawn_prune_task;
