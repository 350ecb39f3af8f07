//! Environment-driven configuration structures shared by all binaries.

use std::env;

use thiserror::Error;

/// API-specific configuration (HTTP bind + upstream RPC endpoint) so the
/// HTTP surface carries everything it needs without ambient defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_bind_address: String,
    solana_rpc_url: String,
}

impl ApiConfig {
    /// Loads only the environment variables required by the API binary.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        Ok(Self {
            api_bind_address: get_required_var("API_BIND_ADDRESS")?,
            solana_rpc_url: get_required_var("SOLANA_RPC_URL")?,
        })
    }

    pub fn api_bind_address(&self) -> &str {
        &self.api_bind_address
    }

    pub fn solana_rpc_url(&self) -> &str {
        &self.solana_rpc_url
    }
}

/// Key configuration derived from `.env`/process variables for the query
/// binary. The RPC endpoint is deliberately required: there is no
/// compiled-in default node to fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    solana_rpc_url: String,
}

impl BootstrapConfig {
    /// Loads configuration by hydrating `.env` (if present) and reading the
    /// required process variables. Missing or malformed entries surface as
    /// `ConfigError` so binaries can respond gracefully.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        Ok(Self {
            solana_rpc_url: get_required_var("SOLANA_RPC_URL")?,
        })
    }

    pub fn solana_rpc_url(&self) -> &str {
        &self.solana_rpc_url
    }
}

fn get_required_var(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ConfigError::MissingVar { key })
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(_) => Err(ConfigError::MissingVar { key }),
    }
}

pub fn hydrate_env_file() -> Result<(), ConfigError> {
    if env::var_os("SOL_HISTORY_SKIP_DOTENV").is_some() {
        return Ok(());
    }
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ConfigError::Dotenv { source: err }),
    }

    Ok(())
}

/// Errors emitted when `.env` hydration or environment parsing fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable `{key}`")]
    MissingVar { key: &'static str },
    #[error("failed to load .env file: {source}")]
    Dotenv {
        #[from]
        source: dotenvy::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_GUARD: Mutex<()> = Mutex::new(());

    fn set_env() {
        env::set_var("SOL_HISTORY_SKIP_DOTENV", "1");
        env::set_var("API_BIND_ADDRESS", "127.0.0.1:8080");
        env::set_var("SOLANA_RPC_URL", "http://localhost:8899");
    }

    #[test]
    fn api_config_reads_env() {
        let _guard = ENV_GUARD.lock().unwrap();
        set_env();
        let config = ApiConfig::load_from_env().expect("api config loads");
        assert_eq!(config.api_bind_address(), "127.0.0.1:8080");
        assert_eq!(config.solana_rpc_url(), "http://localhost:8899");
    }

    #[test]
    fn bootstrap_config_requires_rpc_url() {
        let _guard = ENV_GUARD.lock().unwrap();
        set_env();
        env::remove_var("SOLANA_RPC_URL");

        let err = BootstrapConfig::load_from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVar {
                key: "SOLANA_RPC_URL"
            }
        ));

        set_env();
    }

    #[test]
    fn required_env_vars_are_trimmed() {
        let _guard = ENV_GUARD.lock().unwrap();
        set_env();
        env::set_var("SOLANA_RPC_URL", "  http://localhost:8899  ");

        let config = BootstrapConfig::load_from_env().expect("config loads");
        assert_eq!(config.solana_rpc_url(), "http://localhost:8899");

        set_env();
    }

    #[test]
    fn empty_required_env_var_is_treated_as_missing() {
        let _guard = ENV_GUARD.lock().unwrap();
        set_env();
        env::set_var("SOLANA_RPC_URL", "   ");

        let err = BootstrapConfig::load_from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVar {
                key: "SOLANA_RPC_URL"
            }
        ));

        set_env();
    }
}
