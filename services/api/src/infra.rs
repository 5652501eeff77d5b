use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use content_compliance::compliance::{ComplianceService, RuleCatalog};
use content_compliance::config::{AppConfig, ComplianceSettings};
use content_compliance::error::AppError;
use content_compliance::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the shared catalog once and wraps it with the configured defaults.
pub(crate) fn build_service(settings: &ComplianceSettings) -> Result<ComplianceService, AppError> {
    let catalog = Arc::new(RuleCatalog::standard()?);
    let defaults = settings.optimization_config();
    info!(
        rules = catalog.len(),
        target_score = defaults.target_applicable_score,
        max_retries = defaults.max_retries,
        "rule catalog loaded"
    );
    Ok(ComplianceService::new(
        catalog,
        defaults,
        settings.content_limits(),
    ))
}

/// Shared startup for the one-shot commands.
pub(crate) fn bootstrap() -> Result<(AppConfig, ComplianceService), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let service = build_service(&config.compliance)?;
    Ok((config, service))
}

/// Reads a document from `path`, or from stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(io::stdin());
    }
    fs::read_to_string(path)
}
