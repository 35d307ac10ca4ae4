//! Domain records and retention rules.

#![forbid(unsafe_code)]

mod duration;
mod event;
mod retention;

pub use duration::parse_go_duration;
pub use event::ClusterEvent;
pub use retention::{MIN_RETENTION_WINDOW, RetentionCutoff, RetentionWindow, is_stale};
