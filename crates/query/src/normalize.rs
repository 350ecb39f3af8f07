use chrono::DateTime;

use sol_history_domain::model::DisplayRecord;

use crate::rpc::{TransactionDetail, TransactionMeta};

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Projects one fetched transaction into a display record.
///
/// An absent detail (the node no longer knows the signature) projects to
/// `None` and is dropped by the caller, as is a detail without any
/// signature. Missing balance snapshots degrade to a zero amount rather
/// than an error.
pub fn normalize(detail: Option<TransactionDetail>) -> Option<DisplayRecord> {
    let detail = detail?;
    let signature = detail.transaction.signatures.first()?.clone();
    let block_time = detail
        .block_time
        .and_then(|secs| DateTime::from_timestamp(secs, 0));
    let amount = detail.meta.as_ref().map_or(0.0, sol_delta);

    Some(DisplayRecord {
        signature,
        block_time,
        amount,
    })
}

// Index 0 is the fee-payer slot of the account list, so this is the net
// change of the transaction's primary account.
fn sol_delta(meta: &TransactionMeta) -> f64 {
    match (meta.pre_balances.first(), meta.post_balances.first()) {
        (Some(&pre), Some(&post)) => (post as f64 - pre as f64) / LAMPORTS_PER_SOL,
        _ => 0.0,
    }
}
