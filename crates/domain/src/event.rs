use chrono::{DateTime, Utc};
use eventsweep_core::{AppResult, NonEmptyString};

use crate::{RetentionCutoff, is_stale};

/// A namespaced cluster event as seen by the cleanup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEvent {
    namespace: NonEmptyString,
    name: NonEmptyString,
    creation_timestamp: DateTime<Utc>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl ClusterEvent {
    /// Creates an event record without a last-observed timestamp.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        creation_timestamp: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            namespace: NonEmptyString::new(namespace)?,
            name: NonEmptyString::new(name)?,
            creation_timestamp,
            last_timestamp: None,
        })
    }

    /// Sets the last-observed timestamp.
    #[must_use]
    pub fn with_last_timestamp(mut self, last_timestamp: Option<DateTime<Utc>>) -> Self {
        self.last_timestamp = last_timestamp;
        self
    }

    /// Returns the namespace that owns the event.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// Returns the event object name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns when the event object was created.
    #[must_use]
    pub fn creation_timestamp(&self) -> DateTime<Utc> {
        self.creation_timestamp
    }

    /// Returns when the event was last observed, if it ever recurred.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_timestamp
    }

    /// Returns whether the event is older than the cutoff.
    #[must_use]
    pub fn is_stale(&self, cutoff: RetentionCutoff) -> bool {
        is_stale(self.creation_timestamp, self.last_timestamp, cutoff)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::ClusterEvent;
    use crate::RetentionCutoff;

    #[test]
    fn new_rejects_blank_names() {
        assert!(ClusterEvent::new("default", " ", Utc::now()).is_err());
        assert!(ClusterEvent::new("", "pod.17a", Utc::now()).is_err());
    }

    #[test]
    fn recurring_event_is_kept_while_recently_observed() {
        let now = Utc::now();
        let event = ClusterEvent::new("default", "pod.17a", now - Duration::days(3))
            .map(|event| event.with_last_timestamp(Some(now - Duration::minutes(5))));
        assert!(event.is_ok());
        let event = event.unwrap_or_else(|_| unreachable!());

        assert_eq!(event.namespace(), "default");
        assert_eq!(event.name(), "pod.17a");
        assert!(!event.is_stale(RetentionCutoff::at(now - Duration::hours(1))));
        assert!(event.is_stale(RetentionCutoff::at(now)));
    }
}
