pub mod history;
pub mod metrics;

pub use history::history_handler;
pub use metrics::metrics_handler;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use sol_history_domain::model::AddressFormatError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(#[from] AddressFormatError),
    #[error("upstream query failed: {0}")]
    Upstream(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
