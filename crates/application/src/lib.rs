//! Application services and ports.

#![forbid(unsafe_code)]

mod cleanup_ports;
mod cleanup_service;
mod retry;

pub use cleanup_ports::{CleanupObserver, ClusterEventRepository};
pub use cleanup_service::{
    CleanupReport, CleanupRequest, EventCleanupService, NamespaceFailure, NamespaceOutcome,
    PROGRESS_INTERVAL,
};
pub use retry::{DEFAULT_RETRY_BASE_DELAY, RetryPolicy};
