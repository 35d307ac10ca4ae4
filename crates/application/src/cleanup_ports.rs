mod observer;
mod repository;

pub use observer::CleanupObserver;
pub use repository::ClusterEventRepository;
