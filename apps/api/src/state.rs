use crate::config::Config;
use crate::reports::store::ReportStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Recent analyses addressable by the report endpoints.
    pub reports: ReportStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let reports = ReportStore::new(config.report_cache_capacity);
        Self { config, reports }
    }
}
