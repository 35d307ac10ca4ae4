use eventsweep_core::AppError;

/// Result of processing one namespace.
#[derive(Debug)]
pub struct NamespaceOutcome {
    /// Namespace name.
    pub namespace: String,
    /// Events listed in the namespace.
    pub scanned: usize,
    /// Events classified stale, deleted or planned for deletion.
    pub stale: usize,
    /// Error that stopped the namespace early, if any.
    pub error: Option<AppError>,
}

impl NamespaceOutcome {
    pub(super) fn new(namespace: &str, scanned: usize, stale: usize) -> Self {
        Self {
            namespace: namespace.to_owned(),
            scanned,
            stale,
            error: None,
        }
    }

    pub(super) fn with_error(mut self, error: AppError) -> Self {
        self.error = Some(error);
        self
    }

    /// Returns whether the namespace finished without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// A namespace that stopped early, with the error that stopped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceFailure {
    /// Namespace name.
    pub namespace: String,
    /// Rendered error.
    pub message: String,
}

/// Run-wide statistics.
///
/// Counts are purely additive. A namespace whose deletions stopped early
/// still contributes its whole stale set to `deleted_events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Whether the run issued no deletions.
    pub dry_run: bool,
    /// Namespaces processed, including failed ones.
    pub namespaces_scanned: usize,
    /// Events listed across all namespaces.
    pub total_events: usize,
    /// Events deleted, or that would be deleted in a dry run.
    pub deleted_events: usize,
    /// Namespaces that stopped early.
    pub failed_namespaces: Vec<NamespaceFailure>,
}

impl CleanupReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Adds one namespace outcome to the totals.
    pub fn merge(&mut self, outcome: NamespaceOutcome) {
        self.namespaces_scanned += 1;
        self.total_events += outcome.scanned;
        self.deleted_events += outcome.stale;

        if let Some(error) = outcome.error {
            self.failed_namespaces.push(NamespaceFailure {
                namespace: outcome.namespace,
                message: error.to_string(),
            });
        }
    }

    /// Returns the events left in place.
    #[must_use]
    pub fn retained_events(&self) -> usize {
        self.total_events.saturating_sub(self.deleted_events)
    }
}
