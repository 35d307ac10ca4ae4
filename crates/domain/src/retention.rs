use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use eventsweep_core::{AppError, AppResult};

use crate::parse_go_duration;

/// Shortest retention window accepted for a cleanup run.
pub const MIN_RETENTION_WINDOW: Duration = Duration::from_secs(30);

/// How long events are kept before they become eligible for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow(Duration);

impl RetentionWindow {
    /// Creates a retention window, rejecting anything below [`MIN_RETENTION_WINDOW`].
    pub fn new(duration: Duration) -> AppResult<Self> {
        if duration < MIN_RETENTION_WINDOW {
            return Err(AppError::Validation(format!(
                "duration must be at least {}, got {}",
                humantime::format_duration(MIN_RETENTION_WINDOW),
                humantime::format_duration(duration)
            )));
        }

        Ok(Self(duration))
    }

    /// Parses a Go-style duration string and validates it.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::new(parse_go_duration(value)?)
    }

    /// Returns the underlying duration.
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl FromStr for RetentionWindow {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for RetentionWindow {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", humantime::format_duration(self.0))
    }
}

/// The instant below which events are considered stale.
///
/// A cutoff is computed once per run so every namespace is judged against
/// the same boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RetentionCutoff(DateTime<Utc>);

impl RetentionCutoff {
    /// Creates a cutoff at an explicit instant.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Computes `now - window`.
    pub fn from_now(now: DateTime<Utc>, window: RetentionWindow) -> AppResult<Self> {
        let delta = chrono::Duration::from_std(window.as_duration()).map_err(|error| {
            AppError::Validation(format!("retention window {window} is out of range: {error}"))
        })?;

        now.checked_sub_signed(delta)
            .map(Self)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "retention window {window} reaches before the earliest representable time"
                ))
            })
    }

    /// Returns whether `instant` is strictly before the cutoff.
    #[must_use]
    pub fn is_before_cutoff(&self, instant: DateTime<Utc>) -> bool {
        instant < self.0
    }
}

impl Display for RetentionCutoff {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_rfc3339())
    }
}

/// Classifies an event as stale from its timestamps.
///
/// Events that never recurred carry no last-observed timestamp, so their
/// creation time decides. Otherwise the last-observed timestamp decides,
/// whatever the creation time is. Both comparisons are strict: an event
/// stamped exactly at the cutoff is kept.
#[must_use]
pub fn is_stale(
    creation_timestamp: DateTime<Utc>,
    last_timestamp: Option<DateTime<Utc>>,
    cutoff: RetentionCutoff,
) -> bool {
    match last_timestamp {
        None => cutoff.is_before_cutoff(creation_timestamp),
        Some(last_timestamp) => cutoff.is_before_cutoff(last_timestamp),
    }
}
