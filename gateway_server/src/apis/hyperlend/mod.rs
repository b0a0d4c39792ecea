use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use error_stack::{ResultExt as _, report};
use gateway_models::constants::chains::HYPERLEND_CHAIN;
use gateway_models::network::http::{handle_reqwest_response, value_to_sorted_querystring};
use serde_json::json;
use tokio::time::timeout;

use crate::{
    apis::hyperlend::responses::{MarketsResponse, ReserveRecord},
    deposit::ReserveSource,
    error::{Error, GatewayResult},
};

pub mod responses;

pub const HYPERLEND_BASE_API_URL: &str = "https://api.hyperlend.finance";

#[derive(Debug, Clone)]
pub struct HyperLendClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HyperLendClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Fetches the full market listing. Never cached, every call hits the API.
    pub async fn get_markets(&self, chain: &str) -> GatewayResult<MarketsResponse> {
        let query = value_to_sorted_querystring(&json!({ "chain": chain }))
            .change_context(Error::LendingMarketUnavailable)?;
        let url = format!("{}/data/markets?{query}", self.base_url.trim_end_matches('/'));

        let exchange = async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .change_context(Error::LendingMarketUnavailable)
                .attach_printable("Error in HyperLend request")?;

            handle_reqwest_response::<MarketsResponse>(response)
                .await
                .change_context(Error::LendingMarketUnavailable)
        };

        timeout(self.timeout, exchange)
            .await
            .map_err(|_| report!(Error::LendingMarketUnavailable))
            .attach_printable("HyperLend request timed out")?
    }
}

/// Linear, case-insensitive scan of the listing for the reserve of `underlying`.
pub fn find_receipt_token(reserves: &[ReserveRecord], underlying: Address) -> GatewayResult<Address> {
    let not_found = || report!(Error::ReserveNotFound(underlying.to_checksum(None)));

    let reserve = reserves
        .iter()
        .find(|reserve| {
            Address::from_str(reserve.underlying_asset.trim())
                .is_ok_and(|asset| asset == underlying)
        })
        .ok_or_else(not_found)?;

    let a_token = reserve
        .a_token_address
        .as_deref()
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .ok_or_else(|| not_found().attach_printable("Reserve has no aTokenAddress"))?;

    let a_token = Address::from_str(a_token)
        .map_err(|_| not_found().attach_printable(format!("Malformed aTokenAddress {a_token}")))?;

    tracing::info!(
        "Found aTokenAddress for {} ({}): {}",
        reserve.name.as_deref().unwrap_or("unknown"),
        reserve.symbol.as_deref().unwrap_or("?"),
        a_token
    );
    Ok(a_token)
}

#[async_trait]
impl ReserveSource for HyperLendClient {
    async fn receipt_token(&self, underlying: Address) -> GatewayResult<Address> {
        let markets = self.get_markets(HYPERLEND_CHAIN).await?;
        find_receipt_token(&markets.reserves, underlying)
    }
}
