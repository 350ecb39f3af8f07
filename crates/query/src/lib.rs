//! Cursor-paginated wallet history retrieval: the ledger RPC boundary,
//! the pagination loop, the record normalizer, and the query controller
//! that ties them together behind an observable state machine.

pub mod controller;
pub mod fetcher;
pub mod normalize;
pub mod rpc;

pub use controller::{HistoryController, QueryError};
pub use fetcher::{fetch_all_signatures, PAGE_SIZE};
pub use normalize::{normalize, LAMPORTS_PER_SOL};
pub use rpc::{HttpLedgerSource, LedgerSource, SignatureEntry, TransactionDetail};
