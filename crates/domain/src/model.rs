//! Core value types for wallet history queries: the validated wallet
//! address, the display-ready record, and the query state machine shared
//! between the query engine and its observers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use thiserror::Error;

/// Byte length of a decoded Solana account address.
pub const ADDRESS_LENGTH: usize = 32;

/// Errors emitted when user-supplied wallet addresses fail validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressFormatError {
    #[error("wallet address contains non-base58 characters")]
    NonBase58,
    #[error("wallet address must decode to exactly {ADDRESS_LENGTH} bytes")]
    WrongByteLength,
}

/// A syntactically valid base58 account address.
///
/// Parsing happens before any network traffic, so a malformed address is
/// rejected locally with a user-correctable error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(address: &str) -> Result<Self, AddressFormatError> {
        let trimmed = address.trim();
        let decoded = bs58::decode(trimmed)
            .into_vec()
            .map_err(|_| AddressFormatError::NonBase58)?;
        if decoded.len() != ADDRESS_LENGTH {
            return Err(AddressFormatError::WrongByteLength);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// One normalized history entry, ready for rendering.
///
/// `amount` is the SOL delta of the transaction's index-0 account (the
/// fee payer). When the queried wallet is not the primary signer the
/// value describes the fee payer's balance change, not the wallet's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub signature: String,
    pub block_time: Option<DateTime<Utc>>,
    pub amount: f64,
}

/// Tag describing where a query currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QueryStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Full query state owned by one controller instance.
///
/// A single tagged value instead of loose flags: a loading query cannot
/// carry a stale error, and a failed query cannot carry records.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Ready {
        records: Vec<DisplayRecord>,
    },
    Failed {
        error: String,
    },
}

impl QueryState {
    pub fn status(&self) -> QueryStatus {
        match self {
            Self::Idle => QueryStatus::Idle,
            Self::Loading => QueryStatus::Loading,
            Self::Ready { .. } => QueryStatus::Ready,
            Self::Failed { .. } => QueryStatus::Failed,
        }
    }

    /// Records of the last completed query; empty unless `Ready`.
    pub fn records(&self) -> &[DisplayRecord] {
        match self {
            Self::Ready { records } => records,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}
