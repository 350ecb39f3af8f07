use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use sol_history_domain::model::WalletAddress;

use crate::controller::QueryError;

mod types;

pub use types::{
    JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse, SignatureEntry, SignaturesRequestConfig,
    TransactionDetail, TransactionEnvelope, TransactionMeta, TransactionRequestConfig,
};

/// Read capability against the ledger RPC node. Connection handling,
/// retries and timeouts live behind this boundary.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Returns at most `limit` signature references for `address`, newest
    /// first, starting strictly after the `before` cursor when given.
    async fn signatures_page(
        &self,
        address: &WalletAddress,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureEntry>, QueryError>;

    /// Looks up one transaction. `Ok(None)` means the node does not know
    /// the signature; only transport and RPC faults are errors.
    async fn transaction_detail(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionDetail>, QueryError>;
}

/// `LedgerSource` backed by a Solana JSON-RPC endpoint over HTTP.
pub struct HttpLedgerSource {
    http: Client,
    endpoint: String,
}

impl HttpLedgerSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> Result<Option<R>, QueryError>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let envelope: JsonRpcResponse<R> = response.json().await?;
        if let Some(err) = envelope.error {
            return Err(QueryError::Rpc(format!(
                "{} (code {})",
                err.message, err.code
            )));
        }

        Ok(envelope.result)
    }
}

#[async_trait]
impl LedgerSource for HttpLedgerSource {
    async fn signatures_page(
        &self,
        address: &WalletAddress,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureEntry>, QueryError> {
        let config = SignaturesRequestConfig {
            limit,
            before: before.map(str::to_owned),
        };
        let page: Option<Vec<SignatureEntry>> = self
            .call(
                "getSignaturesForAddress",
                (address.as_str().to_owned(), config),
            )
            .await?;

        Ok(page.unwrap_or_default())
    }

    async fn transaction_detail(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionDetail>, QueryError> {
        self.call(
            "getTransaction",
            (signature.to_owned(), TransactionRequestConfig::default()),
        )
        .await
    }
}
