use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EthError;

/// Port ganache, anvil and hardhat all listen on by default.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Environment variable overriding the node URL.
pub const RPC_URL_ENV: &str = "ETH_RPC_URL";
/// Environment variable overriding the receipt poll interval, in milliseconds.
pub const RECEIPT_POLL_MS_ENV: &str = "ETH_RECEIPT_POLL_MS";
/// Environment variable overriding the receipt timeout, in milliseconds.
pub const RECEIPT_TIMEOUT_MS_ENV: &str = "ETH_RECEIPT_TIMEOUT_MS";

const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`RpcClient`](crate::client::RpcClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    pub rpc_url: String,
    /// Provider poll interval while a transaction waits for its receipt.
    pub receipt_poll_interval: Duration,
    /// How long a submitted transaction may stay unmined.
    pub receipt_timeout: Duration,
}

impl RpcConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        }
    }

    /// Defaults overridden by `ETH_RPC_URL`, `ETH_RECEIPT_POLL_MS` and
    /// `ETH_RECEIPT_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, EthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(RPC_URL_ENV) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(EthError::Config(format!(
                    "{RPC_URL_ENV} must be an http(s) url, got {url:?}"
                )));
            }
            config.rpc_url = url;
        }

        if let Some(raw) = lookup(RECEIPT_POLL_MS_ENV) {
            config.receipt_poll_interval = parse_millis(RECEIPT_POLL_MS_ENV, &raw)?;
        }

        if let Some(raw) = lookup(RECEIPT_TIMEOUT_MS_ENV) {
            config.receipt_timeout = parse_millis(RECEIPT_TIMEOUT_MS_ENV, &raw)?;
        }

        Ok(config)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, EthError> {
    raw.trim()
        .parse()
        .map(Duration::from_millis)
        .map_err(|e| EthError::Config(format!("{key}={raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_local_devnet() {
        let config = RpcConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RpcConfig::default());
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.receipt_poll_interval, Duration::from_millis(100));
        assert_eq!(config.receipt_timeout, Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_apply() {
        let config = RpcConfig::from_lookup(lookup_from(&[
            (RPC_URL_ENV, "http://localhost:7545"),
            (RECEIPT_POLL_MS_ENV, "5"),
            (RECEIPT_TIMEOUT_MS_ENV, " 2000 "),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "http://localhost:7545");
        assert_eq!(config.receipt_poll_interval, Duration::from_millis(5));
        assert_eq!(config.receipt_timeout, Duration::from_secs(2));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let result = RpcConfig::from_lookup(lookup_from(&[(RPC_URL_ENV, "ws://127.0.0.1:8546")]));
        assert!(matches!(result, Err(EthError::Config(_))));
    }

    #[test]
    fn unparsable_poll_interval_is_rejected() {
        let result = RpcConfig::from_lookup(lookup_from(&[(RECEIPT_POLL_MS_ENV, "soon")]));
        assert!(matches!(result, Err(EthError::Config(msg)) if msg.contains(RECEIPT_POLL_MS_ENV)));
    }

    #[test]
    fn unparsable_timeout_is_rejected() {
        let result = RpcConfig::from_lookup(lookup_from(&[(RECEIPT_TIMEOUT_MS_ENV, "-1")]));
        assert!(matches!(result, Err(EthError::Config(_))));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RpcConfig::new("http://localhost:7545");
        let json = serde_json::to_string(&config).unwrap();
        let back: RpcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
