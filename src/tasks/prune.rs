//! Expiry Prune Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MruCache;

/// Spawns a background task that periodically prunes expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs and holding the write lock only for the duration of each
/// prune.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `prune_interval_secs` - Interval in seconds between prune runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(MruCache::<String>::new(1000)));
/// let prune_handle = spawn_prune_task(cache.clone(), 60);
/// // Later, during shutdown:
/// prune_handle.abort();
/// ```
pub fn spawn_prune_task<T>(
    cache: Arc<RwLock<MruCache<T>>>,
    prune_interval_secs: u64,
) -> JoinHandle<()>
where
    T: Send + 'static,
{
    let interval = Duration::from_secs(prune_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry prune task with interval of {} seconds",
            prune_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire the write lock and drop expired entries
            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.prune()
            };

            if removed > 0 {
                info!("Expiry prune: removed {} expired entries", removed);
            } else {
                debug!("Expiry prune: no expired entries found");
            }
        }
    })
}
