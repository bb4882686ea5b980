//! Expiration Sweep Task
//!
//! Periodically removes content store entries whose freshness deadline has
//! passed, for nodes running with eager expiration.

use std::time::Duration;

use tracing::{debug, info};

use crate::node::Node;
use crate::tasks::timer::{spawn_repeating, TimerHandle};

/// Spawns a repeating sweep over one node's store.
///
/// Each tick takes the store's write lock and purges every expired entry,
/// so a sweep never interleaves with another store operation.
///
/// # Example
/// ```ignore
/// let sweep = spawn_expiration_sweep(node.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep.cancel();
/// ```
pub fn spawn_expiration_sweep(node: Node, interval: Duration) -> TimerHandle {
    info!(
        "Starting expiration sweep for node '{}' every {:?}",
        node.name(),
        interval
    );

    spawn_repeating(interval, move || {
        let node = node.clone();
        async move {
            let removed = {
                let mut store = node.store().write().await;
                store.purge_expired()
            };

            if removed > 0 {
                info!(
                    "Expiration sweep on '{}': removed {} expired entries",
                    node.name(),
                    removed
                );
            } else {
                debug!("Expiration sweep on '{}': no expired entries found", node.name());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::cache::{ContentStore, ManualClock, Timestamp};
    use crate::config::StoreConfig;
    use crate::packet::DataObject;

    fn node_with_clock() -> (Node, ManualClock) {
        let clock = ManualClock::starting_at(Timestamp::from_millis(1_000));
        let store = ContentStore::with_clock(&StoreConfig::default(), Arc::new(clock.clone()));
        (Node::new("router", store), clock)
    }

    fn data(uri: &str, freshness_ms: Option<i64>) -> DataObject {
        let data = DataObject::new(uri.parse().unwrap(), b"value".to_vec());
        match freshness_ms {
            Some(ms) => data.with_freshness(ChronoDuration::milliseconds(ms)),
            None => data,
        }
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let (node, clock) = node_with_clock();
        {
            let mut store = node.store().write().await;
            store.add(data("/expire/1", Some(50)));
            store.add(data("/expire/2", Some(50)));
            store.add(data("/persist", None));
            assert_eq!(store.size(), 3);
        }

        clock.advance_ms(100);
        let sweep = spawn_expiration_sweep(node.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        sweep.cancel();

        let store = node.store().read().await;
        assert_eq!(store.size(), 1, "Only the unbounded entry should remain");
        assert!(store.contains(&"/persist".parse().unwrap()));
        assert_eq!(store.stats().expirations, 2);
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_entries() {
        let (node, _clock) = node_with_clock();
        {
            let mut store = node.store().write().await;
            store.add(data("/fresh/1", Some(60_000)));
            store.add(data("/fresh/2", Some(60_000)));
        }

        let sweep = spawn_expiration_sweep(node.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        sweep.cancel();

        let store = node.store().read().await;
        assert_eq!(store.size(), 2, "Fresh entries should not be removed");
    }

    #[tokio::test]
    async fn test_sweep_can_be_cancelled() {
        let (node, _clock) = node_with_clock();

        let sweep = spawn_expiration_sweep(node, Duration::from_millis(10));
        sweep.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(sweep.is_finished(), "Sweep should be finished after cancel");
    }
}
