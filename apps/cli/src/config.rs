use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eventsweep_application::RetryPolicy;
use eventsweep_core::{AppError, AppResult};
use eventsweep_domain::RetentionWindow;
use eventsweep_infrastructure::{DEFAULT_LIST_PAGE_SIZE, KubeconfigSource};

/// `--kubeconfig` value selecting the pod service account.
const IN_CLUSTER_KUBECONFIG: &str = "in-cluster";

/// Deletes Kubernetes events older than a retention window in every namespace.
#[derive(Debug, Parser)]
#[command(name = "eventsweep", version)]
pub struct Cli {
    /// Path to a kubeconfig file, or `in-cluster` for the pod service account.
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<String>,

    /// Delete events older than this, in Go duration syntax (at least 30s).
    #[arg(long, default_value = "1h")]
    pub duration: String,

    /// Sustained cluster API requests per second. Zero disables throttling.
    #[arg(long, default_value_t = 200.0)]
    pub qps: f64,

    /// Cluster API requests allowed in a burst.
    #[arg(long, default_value_t = 200)]
    pub burst: u32,

    /// Retries for each list or delete call.
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Objects per list request. Zero lists everything in one request.
    #[arg(long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
    pub page_size: u32,

    /// Report what would be deleted without deleting anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub kubeconfig: KubeconfigSource,
    pub window: RetentionWindow,
    pub qps: f64,
    pub burst: u32,
    pub retry_policy: RetryPolicy,
    pub page_size: u32,
    pub dry_run: bool,
}

impl SweepConfig {
    /// Validates parsed flags. Runs before any cluster call.
    pub fn from_cli(cli: Cli) -> AppResult<Self> {
        let window = RetentionWindow::parse(cli.duration.as_str())?;

        if !cli.qps.is_finite() {
            return Err(AppError::Validation(format!(
                "--qps must be a finite number, got {}",
                cli.qps
            )));
        }

        if cli.qps > 0.0 && Duration::try_from_secs_f64(1.0 / cli.qps).is_err() {
            return Err(AppError::Validation(format!(
                "--qps {} is too small to schedule a request",
                cli.qps
            )));
        }

        if cli.qps > 0.0 && cli.burst == 0 {
            return Err(AppError::Validation(
                "--burst must be greater than zero when --qps is positive".to_owned(),
            ));
        }

        Ok(Self {
            kubeconfig: resolve_kubeconfig(cli.kubeconfig.as_deref()),
            window,
            qps: cli.qps,
            burst: cli.burst,
            retry_policy: RetryPolicy::new(cli.retries),
            page_size: cli.page_size,
            dry_run: cli.dry_run,
        })
    }
}

/// Resolves the flag (or `KUBECONFIG`) into a credential source.
///
/// A `KUBECONFIG` list uses its first entry. Blank values fall back to the
/// in-cluster service account.
fn resolve_kubeconfig(value: Option<&str>) -> KubeconfigSource {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None | Some(IN_CLUSTER_KUBECONFIG) => KubeconfigSource::InCluster,
        Some(value) => std::env::split_paths(value)
            .find(|path| !path.as_os_str().is_empty())
            .map_or(KubeconfigSource::InCluster, |path: PathBuf| {
                KubeconfigSource::Path(path)
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::{CommandFactory, Parser};
    use eventsweep_core::AppError;
    use eventsweep_infrastructure::KubeconfigSource;

    use super::{Cli, SweepConfig, resolve_kubeconfig};

    fn parse(arguments: &[&str]) -> Cli {
        let mut argv = vec!["eventsweep"];
        argv.extend_from_slice(arguments);
        Cli::try_parse_from(argv).unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = SweepConfig::from_cli(parse(&["--kubeconfig", "/tmp/kubeconfig"]));
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.window.as_duration(), Duration::from_secs(3600));
        assert!((config.qps - 200.0).abs() < f64::EPSILON);
        assert_eq!(config.burst, 200);
        assert_eq!(config.retry_policy.max_retries(), 3);
        assert_eq!(config.page_size, 500);
        assert!(!config.dry_run);
        assert_eq!(
            config.kubeconfig,
            KubeconfigSource::Path(PathBuf::from("/tmp/kubeconfig"))
        );
    }

    #[test]
    fn short_duration_is_rejected_before_connecting() {
        let config = SweepConfig::from_cli(parse(&["--duration", "20s"]));
        assert!(matches!(config, Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_duration_is_rejected() {
        let config = SweepConfig::from_cli(parse(&["--duration", "one hour"]));
        assert!(matches!(config, Err(AppError::Validation(_))));
    }

    #[test]
    fn positive_qps_requires_burst() {
        let config = SweepConfig::from_cli(parse(&["--qps", "50", "--burst", "0"]));
        assert!(matches!(config, Err(AppError::Validation(_))));

        let config = SweepConfig::from_cli(parse(&["--qps", "0", "--burst", "0"]));
        assert!(config.is_ok());
    }

    #[test]
    fn vanishingly_small_qps_is_rejected() {
        let config = SweepConfig::from_cli(parse(&["--qps", "1e-300", "--burst", "1"]));
        assert!(matches!(config, Err(AppError::Validation(_))));

        let config = SweepConfig::from_cli(parse(&["--qps", "0.001", "--burst", "1"]));
        assert!(config.is_ok());
    }

    #[test]
    fn flags_override_defaults() {
        let config = SweepConfig::from_cli(parse(&[
            "--duration",
            "2h45m",
            "--retries",
            "0",
            "--page-size",
            "0",
            "--dry-run",
        ]));
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.window.as_duration(), Duration::from_secs(9900));
        assert_eq!(config.retry_policy.max_retries(), 0);
        assert_eq!(config.page_size, 0);
        assert!(config.dry_run);
    }

    #[test]
    fn kubeconfig_resolution_prefers_path_then_in_cluster() {
        assert_eq!(resolve_kubeconfig(None), KubeconfigSource::InCluster);
        assert_eq!(resolve_kubeconfig(Some("  ")), KubeconfigSource::InCluster);
        assert_eq!(
            resolve_kubeconfig(Some("in-cluster")),
            KubeconfigSource::InCluster
        );
        assert_eq!(
            resolve_kubeconfig(Some("/home/ops/.kube/config")),
            KubeconfigSource::Path(PathBuf::from("/home/ops/.kube/config"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn kubeconfig_list_uses_first_entry() {
        assert_eq!(
            resolve_kubeconfig(Some(":/etc/kube/a.yaml:/etc/kube/b.yaml")),
            KubeconfigSource::Path(PathBuf::from("/etc/kube/a.yaml"))
        );
    }
}
