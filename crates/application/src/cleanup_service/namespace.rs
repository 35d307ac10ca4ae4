use eventsweep_core::AppResult;
use eventsweep_domain::RetentionCutoff;

use super::{EventCleanupService, NamespaceOutcome, PROGRESS_INTERVAL, stale_events};

impl EventCleanupService {
    /// Lists, classifies and deletes the stale events of one namespace.
    ///
    /// Listing and each deletion go through the retry policy. Once a call
    /// exhausts its retries the namespace stops and the error is carried in
    /// the outcome. Events already deleted stay deleted.
    pub async fn process_namespace(
        &self,
        namespace: &str,
        cutoff: RetentionCutoff,
        dry_run: bool,
    ) -> NamespaceOutcome {
        self.observer.namespace_started(namespace);

        let repository = self.repository.as_ref();
        let events = match self
            .retry_policy
            .execute(move || repository.list_events(namespace))
            .await
        {
            Ok(events) => events,
            Err(error) => return NamespaceOutcome::new(namespace, 0, 0).with_error(error),
        };

        let stale = stale_events(&events, cutoff);
        let outcome = NamespaceOutcome::new(namespace, events.len(), stale.len());
        if stale.is_empty() {
            return outcome;
        }

        self.observer
            .stale_events_found(namespace, stale.len(), events.len(), dry_run);
        if dry_run {
            return outcome;
        }

        for (index, event) in stale.iter().copied().enumerate() {
            let deleted = self
                .retry_policy
                .execute(move || self.delete_if_present(event.namespace(), event.name()))
                .await;
            if let Err(error) = deleted {
                return outcome.with_error(error);
            }

            let deleted_count = index + 1;
            if deleted_count % PROGRESS_INTERVAL == 0 {
                self.observer
                    .deletion_progress(namespace, deleted_count, stale.len());
            }
        }

        outcome
    }

    async fn delete_if_present(&self, namespace: &str, name: &str) -> AppResult<()> {
        match self.repository.delete_event(namespace, name).await {
            Err(error) if error.is_not_found() => Ok(()),
            result => result,
        }
    }
}
