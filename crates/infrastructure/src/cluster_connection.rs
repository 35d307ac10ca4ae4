use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use eventsweep_core::{AppError, AppResult};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::info;

/// Where cluster credentials come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubeconfigSource {
    /// A kubeconfig file, using its current context.
    Path(PathBuf),
    /// The service account mounted into the running pod.
    InCluster,
}

impl Display for KubeconfigSource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(formatter, "{}", path.display()),
            Self::InCluster => formatter.write_str("in-cluster"),
        }
    }
}

/// Builds a cluster client from the given credential source.
pub async fn connect_cluster(source: &KubeconfigSource) -> AppResult<Client> {
    let config = match source {
        KubeconfigSource::Path(path) => {
            let kubeconfig = Kubeconfig::read_from(path).map_err(|error| {
                AppError::Validation(format!(
                    "failed to read kubeconfig '{}': {error}",
                    path.display()
                ))
            })?;

            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|error| {
                    AppError::Validation(format!(
                        "failed to load kubeconfig '{}': {error}",
                        path.display()
                    ))
                })?
        }
        KubeconfigSource::InCluster => Config::incluster().map_err(|error| {
            AppError::Validation(format!(
                "no kubeconfig given and in-cluster configuration is unavailable: {error}"
            ))
        })?,
    };

    info!(
        source = %source,
        cluster_url = %config.cluster_url,
        "cluster configuration loaded"
    );

    Client::try_from(config)
        .map_err(|error| AppError::Internal(format!("failed to build cluster client: {error}")))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use eventsweep_core::AppError;

    use super::{KubeconfigSource, connect_cluster};

    #[test]
    fn source_displays_path_or_in_cluster() {
        let path = KubeconfigSource::Path(PathBuf::from("/etc/kube/admin.conf"));
        assert_eq!(path.to_string(), "/etc/kube/admin.conf");
        assert_eq!(KubeconfigSource::InCluster.to_string(), "in-cluster");
    }

    #[tokio::test]
    async fn missing_kubeconfig_file_is_a_validation_error() {
        let source = KubeconfigSource::Path(PathBuf::from(
            "/nonexistent/eventsweep/kubeconfig.yaml",
        ));

        let result = connect_cluster(&source).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
