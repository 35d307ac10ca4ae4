use eventsweep_application::{CleanupObserver, NamespaceOutcome};
use tracing::{debug, info, warn};

/// Reports cleanup progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCleanupObserver;

impl CleanupObserver for TracingCleanupObserver {
    fn namespace_started(&self, namespace: &str) {
        debug!(namespace = %namespace, "scanning namespace");
    }

    fn stale_events_found(&self, namespace: &str, stale: usize, total: usize, dry_run: bool) {
        if dry_run {
            info!(
                namespace = %namespace,
                stale,
                total,
                "found events that would be deleted"
            );
        } else {
            info!(namespace = %namespace, stale, total, "found events to delete");
        }
    }

    fn deletion_progress(&self, namespace: &str, deleted: usize, stale: usize) {
        info!(namespace = %namespace, deleted, stale, "deletion progress");
    }

    fn namespace_completed(&self, outcome: &NamespaceOutcome) {
        match &outcome.error {
            Some(error) => warn!(
                namespace = %outcome.namespace,
                scanned = outcome.scanned,
                stale = outcome.stale,
                error = %error,
                "namespace cleanup failed"
            ),
            None if outcome.stale > 0 => info!(
                namespace = %outcome.namespace,
                scanned = outcome.scanned,
                stale = outcome.stale,
                "namespace cleaned"
            ),
            None => debug!(
                namespace = %outcome.namespace,
                scanned = outcome.scanned,
                "no stale events in namespace"
            ),
        }
    }
}
