//! eventsweep: deletes aged Kubernetes events across all namespaces.

#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;

use clap::Parser;
use eventsweep_application::{CleanupReport, CleanupRequest, EventCleanupService};
use eventsweep_core::AppError;
use eventsweep_infrastructure::{
    KubeEventRepository, RequestThrottle, TracingCleanupObserver, connect_cluster,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, SweepConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SweepConfig::from_cli(Cli::parse())?;

    info!(
        kubeconfig = %config.kubeconfig,
        duration = %config.window,
        qps = config.qps,
        burst = config.burst,
        retries = config.retry_policy.max_retries(),
        page_size = config.page_size,
        dry_run = config.dry_run,
        "eventsweep started"
    );

    let client = connect_cluster(&config.kubeconfig).await?;
    let repository = Arc::new(
        KubeEventRepository::new(client, RequestThrottle::new(config.qps, config.burst))
            .with_page_size(config.page_size),
    );
    let service = EventCleanupService::new(
        repository,
        Arc::new(TracingCleanupObserver),
        config.retry_policy,
    );

    let report = service
        .run(CleanupRequest {
            window: config.window,
            dry_run: config.dry_run,
        })
        .await?;

    log_report(&report);
    Ok(())
}

fn log_report(report: &CleanupReport) {
    for failure in &report.failed_namespaces {
        warn!(
            namespace = %failure.namespace,
            error = %failure.message,
            "namespace was not fully cleaned"
        );
    }

    let summary = if report.dry_run {
        "dry run completed, no events were deleted"
    } else {
        "cleanup completed"
    };

    info!(
        namespaces_scanned = report.namespaces_scanned,
        total_events = report.total_events,
        deleted_events = report.deleted_events,
        retained_events = report.retained_events(),
        failed_namespaces = report.failed_namespaces.len(),
        dry_run = report.dry_run,
        "{summary}"
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
