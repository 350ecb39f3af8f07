use metrics::{counter, histogram};
use tracing::debug;

use sol_history_domain::model::WalletAddress;

use crate::controller::QueryError;
use crate::rpc::{LedgerSource, SignatureEntry};

/// Page size requested from `getSignaturesForAddress`.
pub const PAGE_SIZE: usize = 100;

/// Walks the full signature history of `address`, newest first.
///
/// Each page is keyed on the last signature of the previous one; the walk
/// ends on the first page shorter than `PAGE_SIZE`, so a history that is
/// an exact multiple of the page size costs one extra, empty request.
/// There is no bound on pages or accumulated signatures. A failing page
/// aborts the whole walk with no partial result.
pub async fn fetch_all_signatures<S>(
    source: &S,
    address: &WalletAddress,
) -> Result<Vec<SignatureEntry>, QueryError>
where
    S: LedgerSource + ?Sized,
{
    let mut all = Vec::new();
    let mut before: Option<String> = None;

    loop {
        let page = source
            .signatures_page(address, PAGE_SIZE, before.as_deref())
            .await?;

        counter!("history_pages_fetched_total").increment(1);
        histogram!("history_page_entries").record(page.len() as f64);
        debug!(entries = page.len(), cursor = ?before, "fetched signature page");

        let short_page = page.len() < PAGE_SIZE;
        before = page.last().map(|entry| entry.signature.clone());
        all.extend(page);

        if short_page {
            return Ok(all);
        }
    }
}
