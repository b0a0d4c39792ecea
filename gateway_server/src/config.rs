use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use error_stack::{ResultExt as _, report};
use gateway_models::constants::chains::Network;
use gateway_models::network::RateLimitWindow;

use crate::apis::hyperlend::HYPERLEND_BASE_API_URL;
use crate::apis::openai::OPENAI_BASE_API_URL;
use crate::error::{Error, GatewayResult};
use crate::routers::constants::GLUEX_BASE_API_URL;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_EXTERNAL_CALL_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct GluexConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub unique_pid: Option<String>,
    pub rate_limit: Option<RateLimitWindow>,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

/// Process configuration, read once at startup.
///
/// Credentials are optional here. Their absence only fails the requests that need them.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_address: SocketAddr,
    pub rpc_urls: HashMap<Network, String>,
    pub gluex: GluexConfig,
    pub hyperlend_api_url: String,
    pub openai: OpenAiConfig,
    pub external_call_timeout: Duration,
    pub max_request_body_size: usize,
}

impl GatewayConfig {
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_address = get("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .change_context(Error::ConfigError("Invalid BIND_ADDRESS".to_string()))?;

        let rpc_urls = Network::supported_networks()
            .into_iter()
            .filter_map(|network| get(network.rpc_env_var()).map(|url| (network, url)))
            .collect();

        let rate_limit = get("GLUEX_RATE_LIMIT")
            .map(|value| {
                RateLimitWindow::from_string(&value).ok_or_else(|| {
                    report!(Error::ConfigError(format!(
                        "Invalid GLUEX_RATE_LIMIT: {value}"
                    )))
                })
            })
            .transpose()?;

        let timeout_ms = parse_number(&get, "EXTERNAL_CALL_TIMEOUT_MS")?
            .unwrap_or(DEFAULT_EXTERNAL_CALL_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(report!(Error::ConfigError(
                "EXTERNAL_CALL_TIMEOUT_MS must be positive".to_string()
            )));
        }

        let max_request_body_size = parse_number(&get, "MAX_REQUEST_BODY_SIZE")?
            .unwrap_or(DEFAULT_MAX_REQUEST_BODY_SIZE);

        Ok(Self {
            bind_address,
            rpc_urls,
            gluex: GluexConfig {
                api_url: get("GLUEX_API_URL").unwrap_or_else(|| GLUEX_BASE_API_URL.to_string()),
                api_key: get("GLUEX_API_KEY"),
                unique_pid: get("GLUEX_UNIQUE_PID"),
                rate_limit,
            },
            hyperlend_api_url: get("HYPERLEND_API_URL")
                .unwrap_or_else(|| HYPERLEND_BASE_API_URL.to_string()),
            openai: OpenAiConfig {
                api_url: get("OPENAI_API_URL").unwrap_or_else(|| OPENAI_BASE_API_URL.to_string()),
                api_key: get("OPENAI_API_KEY"),
            },
            external_call_timeout: Duration::from_millis(timeout_ms),
            max_request_body_size,
        })
    }
}

fn parse_number<T, G>(get: &G, key: &str) -> GatewayResult<Option<T>>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|value| {
            value.parse::<T>().map_err(|_| {
                report!(Error::ConfigError(format!("Invalid {key}: {value}")))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn config(vars: &[(&str, &str)]) -> GatewayResult<GatewayConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert!(config.rpc_urls.is_empty());
        assert_eq!(config.gluex.api_url, GLUEX_BASE_API_URL);
        assert_eq!(config.gluex.api_key, None);
        assert_eq!(config.hyperlend_api_url, HYPERLEND_BASE_API_URL);
        assert_eq!(config.external_call_timeout, Duration::from_secs(10));
        assert_eq!(config.max_request_body_size, 64 * 1024);
    }

    #[test]
    fn test_reads_rpc_urls_and_credentials() {
        let config = config(&[
            ("HYPEREVM_RPC_URL", "https://rpc.hyperliquid.xyz/evm"),
            ("POLYGON_RPC_URL", "  "),
            ("GLUEX_API_KEY", "key"),
            ("GLUEX_UNIQUE_PID", "pid"),
            ("GLUEX_RATE_LIMIT", "10s"),
            ("EXTERNAL_CALL_TIMEOUT_MS", "2500"),
        ])
        .unwrap();

        assert_eq!(
            config.rpc_urls.get(&Network::HyperEvm).map(String::as_str),
            Some("https://rpc.hyperliquid.xyz/evm")
        );
        assert!(!config.rpc_urls.contains_key(&Network::Polygon));
        assert_eq!(config.gluex.api_key.as_deref(), Some("key"));
        assert_eq!(
            config.gluex.rate_limit,
            Some(RateLimitWindow::PerSecond(NonZeroU32::new(10).unwrap()))
        );
        assert_eq!(config.external_call_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_rejects_malformed_values() {
        for vars in [
            [("EXTERNAL_CALL_TIMEOUT_MS", "soon")],
            [("EXTERNAL_CALL_TIMEOUT_MS", "0")],
            [("MAX_REQUEST_BODY_SIZE", "-1")],
            [("GLUEX_RATE_LIMIT", "10x")],
            [("BIND_ADDRESS", "localhost")],
        ] {
            let error = config(&vars).unwrap_err();
            assert!(matches!(error.current_context(), Error::ConfigError(_)));
        }
    }
}
