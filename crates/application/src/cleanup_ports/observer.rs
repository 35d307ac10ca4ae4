use crate::NamespaceOutcome;

/// Port receiving progress notifications from a cleanup run.
pub trait CleanupObserver: Send + Sync {
    /// Called before a namespace's events are listed.
    fn namespace_started(&self, namespace: &str);

    /// Called once the stale set of a namespace is known and non-empty.
    fn stale_events_found(&self, namespace: &str, stale: usize, total: usize, dry_run: bool);

    /// Called every `PROGRESS_INTERVAL` confirmed deletions.
    fn deletion_progress(&self, namespace: &str, deleted: usize, stale: usize);

    /// Called after a namespace has been processed, successfully or not.
    fn namespace_completed(&self, outcome: &NamespaceOutcome);
}
