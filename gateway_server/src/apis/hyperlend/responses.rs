use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct MarketsResponse {
    pub reserves: Vec<ReserveRecord>,
}

// https://api.hyperlend.finance/data/markets?chain=hyperEvm
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRecord {
    #[serde(default)]
    pub chain: Option<String>,
    pub underlying_asset: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    // Sent as a string by the API
    #[serde(default)]
    pub decimals: Option<Value>,
    #[serde(default)]
    pub a_token_address: Option<String>,
}
