use std::sync::Arc;

use sol_history_domain::services::telemetry::TelemetryGuard;
use sol_history_query::rpc::LedgerSource;

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn LedgerSource>,
    telemetry: TelemetryGuard,
}

impl AppState {
    pub fn new(source: Arc<dyn LedgerSource>, telemetry: TelemetryGuard) -> Self {
        Self { source, telemetry }
    }

    pub fn source(&self) -> Arc<dyn LedgerSource> {
        Arc::clone(&self.source)
    }

    pub fn telemetry(&self) -> &TelemetryGuard {
        &self.telemetry
    }
}
