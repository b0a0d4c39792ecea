use alloy_primitives::{Address, Bytes};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GluexQuoteResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub result: Option<GluexQuoteResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GluexQuoteResult {
    pub router: Address,
    pub calldata: Bytes,
    #[serde(default)]
    pub output_amount: Option<Value>,
}
