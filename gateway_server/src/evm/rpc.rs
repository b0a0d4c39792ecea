use std::collections::HashMap;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use error_stack::{ResultExt, report};
use gateway_models::constants::chains::Network;
use gateway_models::network::http::handle_reqwest_response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::time::timeout;

use crate::error::{Error, GatewayResult, ModelReportExt};

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

/// Minimal read-only EVM JSON-RPC client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl JsonRpcClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> GatewayResult<T> {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        // The deadline covers the body read, not just the response headers
        let exchange = async {
            let response = self
                .client
                .post(&self.url)
                .json(&body)
                .send()
                .await
                .change_context(Error::RpcError)
                .attach_printable_lazy(|| format!("Error in {method} request"))?;

            handle_reqwest_response::<JsonRpcResponse>(response)
                .await
                .map_err(|report| report.into_gateway().change_context(Error::RpcError))
        };

        let response = timeout(self.timeout, exchange)
            .await
            .map_err(|_| report!(Error::RpcError))
            .attach_printable_lazy(|| format!("{method} timed out after {:?}", self.timeout))??;

        if let Some(error) = response.error {
            tracing::debug!(method, code = error.code, "JSON-RPC error: {}", error.message);
            return Err(report!(Error::RpcError).attach_printable(format!(
                "{method} failed with code {}: {}",
                error.code, error.message
            )));
        }

        let result = response.result.ok_or_else(|| {
            report!(Error::RpcError).attach_printable(format!("{method} returned no result"))
        })?;

        serde_json::from_value(result)
            .change_context(Error::RpcError)
            .attach_printable_lazy(|| format!("Unexpected {method} result"))
    }

    pub async fn eth_call(&self, to: Address, data: Bytes) -> GatewayResult<Bytes> {
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    pub async fn get_balance(&self, address: Address) -> GatewayResult<U256> {
        let quantity: String = self
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        parse_quantity(&quantity)
    }

    pub async fn get_transaction_count(&self, address: Address) -> GatewayResult<u64> {
        let quantity: String = self
            .request("eth_getTransactionCount", json!([address, "latest"]))
            .await?;
        let count = parse_quantity(&quantity)?;
        u64::try_from(count).map_err(|_| {
            report!(Error::RpcError).attach_printable("Transaction count does not fit in u64")
        })
    }

    pub async fn get_code(&self, address: Address) -> GatewayResult<Bytes> {
        self.request("eth_getCode", json!([address, "latest"]))
            .await
    }
}

/// Parses a hex-encoded JSON-RPC quantity such as `"0x1a"`.
pub fn parse_quantity(quantity: &str) -> GatewayResult<U256> {
    let invalid = || report!(Error::RpcError).attach_printable(format!("Invalid quantity {quantity}"));
    let digits = quantity.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|_| invalid())
}

/// JSON-RPC clients for every network with a configured endpoint.
#[derive(Debug, Clone, Default)]
pub struct RpcClients {
    clients: HashMap<Network, JsonRpcClient>,
}

impl RpcClients {
    pub fn new(
        client: &reqwest::Client,
        urls: &HashMap<Network, String>,
        timeout: Duration,
    ) -> Self {
        let clients = urls
            .iter()
            .map(|(network, url)| {
                let rpc = JsonRpcClient::new(client.clone(), url.clone(), timeout);
                (*network, rpc)
            })
            .collect();
        Self { clients }
    }

    pub fn get(&self, network: Network) -> GatewayResult<&JsonRpcClient> {
        self.clients.get(&network).ok_or_else(|| {
            tracing::error!("Server configuration error: Missing {}.", network.rpc_env_var());
            report!(Error::ConfigurationMissing(network.rpc_env_var()))
        })
    }
}
