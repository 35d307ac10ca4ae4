use async_trait::async_trait;
use eventsweep_core::AppResult;
use eventsweep_domain::ClusterEvent;

/// Port for the cluster objects a cleanup run reads and deletes.
#[async_trait]
pub trait ClusterEventRepository: Send + Sync {
    /// Lists the names of all namespaces, in API order.
    async fn list_namespaces(&self) -> AppResult<Vec<String>>;

    /// Lists every event in a namespace, in API order.
    async fn list_events(&self, namespace: &str) -> AppResult<Vec<ClusterEvent>>;

    /// Deletes one event.
    ///
    /// Returns `AppError::NotFound` when the event no longer exists.
    async fn delete_event(&self, namespace: &str, name: &str) -> AppResult<()>;
}
