use std::sync::Arc;

use chrono::Utc;
use eventsweep_core::AppResult;
use eventsweep_domain::{ClusterEvent, RetentionCutoff, RetentionWindow};

use crate::RetryPolicy;
use crate::cleanup_ports::{CleanupObserver, ClusterEventRepository};

mod namespace;
mod report;

pub use report::{CleanupReport, NamespaceFailure, NamespaceOutcome};

/// Number of confirmed deletions between progress notifications.
pub const PROGRESS_INTERVAL: usize = 500;

/// Input for one cleanup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupRequest {
    /// Events older than this window are deleted.
    pub window: RetentionWindow,
    /// Classify and report without issuing deletions.
    pub dry_run: bool,
}

/// Deletes aged events namespace by namespace.
#[derive(Clone)]
pub struct EventCleanupService {
    repository: Arc<dyn ClusterEventRepository>,
    observer: Arc<dyn CleanupObserver>,
    retry_policy: RetryPolicy,
}

impl EventCleanupService {
    /// Creates a cleanup service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ClusterEventRepository>,
        observer: Arc<dyn CleanupObserver>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            repository,
            observer,
            retry_policy,
        }
    }

    /// Runs a cleanup with the cutoff fixed at `now - window`.
    pub async fn run(&self, request: CleanupRequest) -> AppResult<CleanupReport> {
        let cutoff = RetentionCutoff::from_now(Utc::now(), request.window)?;
        self.run_with_cutoff(cutoff, request.dry_run).await
    }

    /// Runs a cleanup against an explicit cutoff.
    ///
    /// Failing to list namespaces aborts the run. Failures inside a
    /// namespace are recorded in the report and the run moves on.
    pub async fn run_with_cutoff(
        &self,
        cutoff: RetentionCutoff,
        dry_run: bool,
    ) -> AppResult<CleanupReport> {
        let namespaces = self.repository.list_namespaces().await?;
        let mut report = CleanupReport::new(dry_run);

        for namespace in namespaces {
            let outcome = self.process_namespace(&namespace, cutoff, dry_run).await;
            self.observer.namespace_completed(&outcome);
            report.merge(outcome);
        }

        Ok(report)
    }
}

fn stale_events(events: &[ClusterEvent], cutoff: RetentionCutoff) -> Vec<&ClusterEvent> {
    events.iter().filter(|event| event.is_stale(cutoff)).collect()
}
