use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use thiserror::Error;

use sol_history_domain::config::{ApiConfig, ConfigError};
use sol_history_domain::services::telemetry::{init_telemetry, TelemetryConfig, TelemetryError};
use sol_history_query::rpc::{HttpLedgerSource, LedgerSource};

use crate::{
    handlers::{history_handler, metrics_handler},
    state::AppState,
};

pub async fn run() -> Result<(), BootstrapError> {
    let config = ApiConfig::load_from_env()?;
    let telemetry_config = TelemetryConfig::from_env("API");
    let telemetry = init_telemetry(&telemetry_config)?;

    let source: Arc<dyn LedgerSource> = Arc::new(HttpLedgerSource::new(config.solana_rpc_url()));
    let state = AppState::new(source, telemetry);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .route(
                "/api/v1/wallet/{address}/history",
                web::get().to(history_handler),
            )
            .route("/metrics", web::get().to(metrics_handler))
    })
    .bind(config.api_bind_address())?
    .run()
    .await?;

    Ok(())
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
