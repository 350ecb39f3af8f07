use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;

use sol_history_domain::model::{QueryStatus, WalletAddress};
use sol_history_domain::services::telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};
use sol_history_query::controller::QueryError;
use sol_history_query::rpc::{
    LedgerSource, SignatureEntry, TransactionDetail, TransactionEnvelope, TransactionMeta,
};

use crate::handlers::{history::HistoryResponse, history_handler};
use crate::state::AppState;

const WALLET: &str = "So11111111111111111111111111111111111111112";

#[derive(Default)]
struct StubLedger {
    entries: Vec<SignatureEntry>,
    details: HashMap<String, TransactionDetail>,
    fail_pages: bool,
}

impl StubLedger {
    fn with_history(signatures: &[&str]) -> Self {
        let entries = signatures
            .iter()
            .map(|signature| SignatureEntry {
                signature: (*signature).to_owned(),
                slot: None,
                block_time: None,
                err: None,
                memo: None,
            })
            .collect();
        let details = signatures
            .iter()
            .map(|signature| ((*signature).to_owned(), detail_for(signature)))
            .collect();
        Self {
            entries,
            details,
            fail_pages: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_pages: true,
            ..Self::default()
        }
    }
}

fn detail_for(signature: &str) -> TransactionDetail {
    TransactionDetail {
        block_time: Some(1_650_000_000),
        meta: Some(TransactionMeta {
            pre_balances: vec![1_000_000_000],
            post_balances: vec![1_250_000_000],
        }),
        transaction: TransactionEnvelope {
            signatures: vec![signature.to_owned()],
        },
    }
}

#[async_trait]
impl LedgerSource for StubLedger {
    async fn signatures_page(
        &self,
        _address: &WalletAddress,
        _limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureEntry>, QueryError> {
        if self.fail_pages {
            return Err(QueryError::Rpc("node unavailable".to_string()));
        }
        if before.is_some() {
            return Ok(Vec::new());
        }
        Ok(self.entries.clone())
    }

    async fn transaction_detail(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionDetail>, QueryError> {
        Ok(self.details.get(signature).cloned())
    }
}

fn telemetry() -> TelemetryGuard {
    let config = TelemetryConfig::from_env("API_TEST");
    init_telemetry(&config).expect("telemetry inits")
}

fn app_state(ledger: StubLedger) -> AppState {
    AppState::new(Arc::new(ledger), telemetry())
}

#[actix_web::test]
async fn rejects_malformed_address() {
    let state = app_state(StubLedger::default());
    let app = test::init_service(App::new().app_data(web::Data::new(state)).route(
        "/api/v1/wallet/{address}/history",
        web::get().to(history_handler),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/wallet/not-base58!!/history")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn returns_normalized_history() {
    let state = app_state(StubLedger::with_history(&["sig-a", "sig-b"]));
    let app = test::init_service(App::new().app_data(web::Data::new(state)).route(
        "/api/v1/wallet/{address}/history",
        web::get().to(history_handler),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/wallet/{WALLET}/history"))
        .to_request();
    let body: HistoryResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.status, QueryStatus::Ready);
    assert_eq!(body.count, 2);
    assert_eq!(body.records[0].signature, "sig-a");
    assert_eq!(body.records[1].signature, "sig-b");
    assert_eq!(body.records[0].amount, 0.25);
}

#[actix_web::test]
async fn drops_entries_without_details() {
    let mut ledger = StubLedger::with_history(&["sig-a", "sig-b"]);
    ledger.details.remove("sig-b");
    let state = app_state(ledger);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).route(
        "/api/v1/wallet/{address}/history",
        web::get().to(history_handler),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/wallet/{WALLET}/history"))
        .to_request();
    let body: HistoryResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.count, 1);
    assert_eq!(body.records[0].signature, "sig-a");
}

#[actix_web::test]
async fn surfaces_upstream_failure_as_bad_gateway() {
    let state = app_state(StubLedger::failing());
    let app = test::init_service(App::new().app_data(web::Data::new(state)).route(
        "/api/v1/wallet/{address}/history",
        web::get().to(history_handler),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/wallet/{WALLET}/history"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_GATEWAY);
}
