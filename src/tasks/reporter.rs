//! Size Reporter Task
//!
//! Periodically logs the occupancy of every node's content store.

use std::time::Duration;

use tracing::info;

use crate::node::NodeSet;
use crate::tasks::timer::{spawn_repeating, TimerHandle};

/// Spawns a repeating report over an explicit set of nodes.
pub fn spawn_size_reporter(nodes: NodeSet, interval: Duration) -> TimerHandle {
    info!(
        "Starting size reporter for {} nodes every {:?}",
        nodes.len(),
        interval
    );

    spawn_repeating(interval, move || {
        let nodes = nodes.clone();
        async move {
            let report = nodes.size_report().await;
            for row in &report.nodes {
                info!(
                    "CS size [{}] node={} size={} max_size={}",
                    report.timestamp, row.node, row.size, row.max_size
                );
            }
            info!("CS size [{}] total={}", report.timestamp, report.total_entries);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_reporter_runs_and_cancels() {
        let nodes = NodeSet::from_config(&Config::default());

        let reporter = spawn_size_reporter(nodes.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!reporter.is_finished());

        reporter.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(reporter.is_finished());

        // Reporting reads sizes only
        assert_eq!(nodes.size_report().await.total_entries, 0);
    }
}
