use actix_web::{web, HttpResponse};
use metrics::counter;
use serde::{Deserialize, Serialize};

use sol_history_domain::model::{DisplayRecord, QueryState, QueryStatus, WalletAddress};
use sol_history_query::controller::HistoryController;

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub status: QueryStatus,
    pub count: usize,
    pub records: Vec<DisplayRecord>,
}

pub async fn history_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let address = WalletAddress::parse(&path.into_inner())?;

    let controller = HistoryController::new(state.source());
    controller.run_query(address.as_str()).await;
    let snapshot = controller.state();

    let status_tag = snapshot.status().as_ref().to_owned();
    counter!("api_history_requests_total", "status" => status_tag).increment(1);

    match snapshot {
        QueryState::Ready { records } => Ok(HttpResponse::Ok().json(HistoryResponse {
            status: QueryStatus::Ready,
            count: records.len(),
            records,
        })),
        QueryState::Failed { error } => Err(ApiError::Upstream(error)),
        other => Ok(HttpResponse::Ok().json(HistoryResponse {
            status: other.status(),
            count: 0,
            records: Vec::new(),
        })),
    }
}
