use chrono::{DateTime, Utc};
use eventsweep_core::{AppError, AppResult};
use eventsweep_domain::ClusterEvent;
use k8s_openapi::api::core::v1::Event;

// 0001-01-01T00:00:00Z, the zero value of a Go time.
const GO_ZERO_TIME_SECONDS: i64 = -62_135_596_800;

fn is_unset(timestamp: DateTime<Utc>) -> bool {
    timestamp.timestamp() <= GO_ZERO_TIME_SECONDS
}

/// Converts an API event into the domain record.
///
/// A missing creation timestamp maps to the earliest instant so the event
/// is always stale. A missing or zero last timestamp stays unset.
pub(super) fn cluster_event_from(namespace: &str, event: Event) -> AppResult<ClusterEvent> {
    let name = event.metadata.name.unwrap_or_default();
    let namespace = event
        .metadata
        .namespace
        .unwrap_or_else(|| namespace.to_owned());
    let creation_timestamp = event
        .metadata
        .creation_timestamp
        .map_or(DateTime::<Utc>::MIN_UTC, |time| time.0);
    let last_timestamp = event
        .last_timestamp
        .map(|time| time.0)
        .filter(|timestamp| !is_unset(*timestamp));

    ClusterEvent::new(namespace, name, creation_timestamp)
        .map(|cluster_event| cluster_event.with_last_timestamp(last_timestamp))
}

/// Maps a client error onto the application error taxonomy.
pub(super) fn map_kube_error(error: kube::Error, context: &str) -> AppError {
    match error {
        kube::Error::Api(response) => {
            let message = format!("{context}: {} ({})", response.message, response.reason);
            match response.code {
                404 => AppError::NotFound(message),
                401 => AppError::Unauthorized(message),
                403 => AppError::Forbidden(message),
                _ => AppError::Unavailable(message),
            }
        }
        other => AppError::Unavailable(format!("{context}: {other}")),
    }
}
