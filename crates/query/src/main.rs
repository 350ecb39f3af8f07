//! Query binary that fetches the full SOL balance history of one wallet
//! and prints the normalized records.

use std::io;
use std::sync::Arc;

use sol_history_domain::config::BootstrapConfig;
use sol_history_domain::model::QueryState;
use sol_history_domain::services::telemetry::{init_telemetry, TelemetryConfig};

use sol_history_query::controller::{HistoryController, QueryError};
use sol_history_query::rpc::HttpLedgerSource;

#[tokio::main]
async fn main() -> io::Result<()> {
    let state = match bootstrap().await {
        Ok(state) => state,
        Err(err) => {
            eprintln!("[query] bootstrap failed: {err}");
            return Err(io::Error::other(err.to_string()));
        }
    };

    match state {
        QueryState::Ready { records } => {
            println!("{} transaction(s)", records.len());
            for record in records {
                let block_time = record
                    .block_time
                    .map(|ts| ts.to_rfc3339())
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "{}  {}  {:+.9} SOL",
                    record.signature, block_time, record.amount
                );
            }
            Ok(())
        }
        QueryState::Failed { error } => {
            eprintln!("[query] query failed: {error}");
            Err(io::Error::other(error))
        }
        _ => {
            eprintln!("usage: sol_history_query <wallet-address>");
            Ok(())
        }
    }
}

async fn bootstrap() -> Result<QueryState, QueryError> {
    let address = std::env::args().nth(1).unwrap_or_default();
    let config = BootstrapConfig::load_from_env()?;
    let telemetry_config = TelemetryConfig::from_env("QUERY");
    init_telemetry(&telemetry_config)?;

    let source = HttpLedgerSource::new(config.solana_rpc_url());
    let controller = HistoryController::new(Arc::new(source));
    controller.run_query(&address).await;

    Ok(controller.state())
}
