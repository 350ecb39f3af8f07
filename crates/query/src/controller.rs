use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use metrics::{counter, gauge};
use thiserror::Error;
use tracing::{debug, info, warn};

use sol_history_domain::{
    config::ConfigError,
    model::{AddressFormatError, DisplayRecord, QueryState, WalletAddress},
    services::telemetry::TelemetryError,
};

use crate::fetcher::fetch_all_signatures;
use crate::normalize::normalize;
use crate::rpc::LedgerSource;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid wallet address: {0}")]
    Validation(#[from] AddressFormatError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("rpc error: {0}")]
    Rpc(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(value: reqwest::Error) -> Self {
        Self::Rpc(value.to_string())
    }
}

/// Drives one wallet-history query end to end and owns the observable
/// `QueryState`: validate the address, walk the signature pages, fan out
/// the per-transaction lookups, normalize, and commit `Ready` or
/// `Failed`.
///
/// Re-entrant with cancel-and-restart semantics: every `run_query` call
/// claims a new generation, and a completion only commits if its
/// generation is still the newest, so a stale response can never
/// overwrite the result of a later request.
pub struct HistoryController<S: ?Sized> {
    source: Arc<S>,
    state: RwLock<QueryState>,
    generation: AtomicU64,
}

impl<S> HistoryController<S>
where
    S: LedgerSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: RwLock::new(QueryState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current query state.
    pub fn state(&self) -> QueryState {
        self.state.read().expect("state lock poisoned").clone()
    }

    /// Runs one query for `address`. A blank address is a no-op and the
    /// state is left untouched; every other outcome lands in `Ready` or
    /// `Failed`. Faults are captured in the state, never propagated.
    pub async fn run_query(&self, address: &str) {
        if address.trim().is_empty() {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.commit(generation, QueryState::Loading);

        let next = match self.execute(address).await {
            Ok(records) => {
                counter!("history_queries_total", "result" => "ok").increment(1);
                gauge!("history_records_ready").set(records.len() as f64);
                info!(records = records.len(), "history query complete");
                QueryState::Ready { records }
            }
            Err(err) => {
                counter!("history_queries_total", "result" => "failed").increment(1);
                warn!(%err, "history query failed");
                QueryState::Failed {
                    error: err.to_string(),
                }
            }
        };

        self.commit(generation, next);
    }

    // Only the newest generation may publish; a superseded query's
    // transition is discarded.
    fn commit(&self, generation: u64, next: QueryState) {
        let mut state = self.state.write().expect("state lock poisoned");
        if self.generation.load(Ordering::SeqCst) == generation {
            *state = next;
        }
    }

    async fn execute(&self, address: &str) -> Result<Vec<DisplayRecord>, QueryError> {
        let address = WalletAddress::parse(address)?;
        let signatures = fetch_all_signatures(self.source.as_ref(), &address).await?;

        // One lookup task per signature; joining in spawn order keeps the
        // result in signature order no matter when each task settles.
        let mut lookups = Vec::with_capacity(signatures.len());
        for entry in &signatures {
            let source = Arc::clone(&self.source);
            let signature = entry.signature.clone();
            lookups.push(tokio::spawn(async move {
                source.transaction_detail(&signature).await
            }));
        }

        let mut records = Vec::with_capacity(signatures.len());
        for (entry, lookup) in signatures.iter().zip(lookups) {
            let detail = match lookup.await {
                Ok(Ok(Some(detail))) => {
                    counter!("history_details_total", "result" => "ok").increment(1);
                    Some(detail)
                }
                Ok(Ok(None)) => {
                    counter!("history_details_total", "result" => "missing").increment(1);
                    debug!(signature = %entry.signature, "transaction not found, dropping entry");
                    None
                }
                Ok(Err(err)) => {
                    counter!("history_details_total", "result" => "error").increment(1);
                    warn!(%err, signature = %entry.signature, "transaction lookup failed, dropping entry");
                    None
                }
                Err(err) => {
                    counter!("history_details_total", "result" => "error").increment(1);
                    warn!(%err, signature = %entry.signature, "transaction lookup task aborted, dropping entry");
                    None
                }
            };

            if let Some(record) = normalize(detail) {
                records.push(record);
            }
        }

        Ok(records)
    }
}
