//! Domain-level building blocks shared across the query and API crates:
//! validated wallet addresses, display records, the query state machine,
//! deterministic configuration loading, and telemetry wiring.

pub mod config;
pub mod model;
pub mod services;

pub use config::{ApiConfig, BootstrapConfig, ConfigError};
pub use model::{
    AddressFormatError, DisplayRecord, QueryState, QueryStatus, WalletAddress, ADDRESS_LENGTH,
};
