use std::fmt::Debug;

use async_trait::async_trait;
use eventsweep_application::ClusterEventRepository;
use eventsweep_core::AppResult;
use eventsweep_domain::ClusterEvent;
use k8s_openapi::api::core::v1::{Event, Namespace};
use kube::api::{Api, DeleteParams, ListParams};
use kube::{Client, ResourceExt};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::RequestThrottle;

mod conversion;

use conversion::{cluster_event_from, map_kube_error};

/// Objects requested per list call before following the continue token.
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 500;

/// Kubernetes API implementation of the cluster event repository.
pub struct KubeEventRepository {
    client: Client,
    throttle: RequestThrottle,
    page_size: u32,
}

impl KubeEventRepository {
    /// Creates a repository over a connected client.
    #[must_use]
    pub fn new(client: Client, throttle: RequestThrottle) -> Self {
        Self {
            client,
            throttle,
            page_size: DEFAULT_LIST_PAGE_SIZE,
        }
    }

    /// Sets the list page size. Zero requests everything in one call.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    async fn list_all<K>(&self, api: &Api<K>, context: &str) -> AppResult<Vec<K>>
    where
        K: Clone + DeserializeOwned + Debug,
    {
        let mut items = Vec::new();
        let mut continue_token: Option<String> = None;

        loop {
            let mut params = ListParams::default();
            if self.page_size > 0 {
                params = params.limit(self.page_size);
            }
            if let Some(token) = continue_token.as_deref() {
                params = params.continue_token(token);
            }

            self.throttle.acquire().await;
            let page = api
                .list(&params)
                .await
                .map_err(|error| map_kube_error(error, context))?;
            items.extend(page.items);

            match page.metadata.continue_ {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl ClusterEventRepository for KubeEventRepository {
    async fn list_namespaces(&self) -> AppResult<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = self.list_all(&api, "failed to list namespaces").await?;

        Ok(namespaces.iter().map(ResourceExt::name_any).collect())
    }

    async fn list_events(&self, namespace: &str) -> AppResult<Vec<ClusterEvent>> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let context = format!("failed to list events in namespace '{namespace}'");
        let events = self.list_all(&api, context.as_str()).await?;

        // A malformed item never becomes valid on retry, so it is dropped.
        Ok(events
            .into_iter()
            .filter_map(|event| match cluster_event_from(namespace, event) {
                Ok(cluster_event) => Some(cluster_event),
                Err(error) => {
                    warn!(namespace = %namespace, error = %error, "skipping malformed event");
                    None
                }
            })
            .collect())
    }

    async fn delete_event(&self, namespace: &str, name: &str) -> AppResult<()> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);

        self.throttle.acquire().await;
        api.delete(name, &DeleteParams::default())
            .await
            .map_err(|error| {
                map_kube_error(
                    error,
                    format!("failed to delete event '{name}' in namespace '{namespace}'").as_str(),
                )
            })?;

        debug!(namespace = %namespace, event = %name, "event deleted");
        Ok(())
    }
}
