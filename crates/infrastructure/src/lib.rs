//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod cluster_connection;
mod kube_event_repository;
mod request_throttle;
mod tracing_cleanup_observer;

pub use cluster_connection::{KubeconfigSource, connect_cluster};
pub use kube_event_repository::{DEFAULT_LIST_PAGE_SIZE, KubeEventRepository};
pub use request_throttle::RequestThrottle;
pub use tracing_cleanup_observer::TracingCleanupObserver;
