use alloy_primitives::{Address, U256};
use gateway_models::constants::chains::Network;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GluexQuoteRequest {
    #[serde(rename = "chainID")]
    pub chain_id: Network,
    pub user_address: Address,
    // Tokens OUT receiver
    pub output_receiver: Address,
    #[serde(rename = "uniquePID")]
    pub unique_pid: String,
    pub input_token: Address,
    pub output_token: Address,
    // Smallest unit of the input token, as a decimal string
    pub input_amount: String,
    pub is_permit2: bool,
}

impl GluexQuoteRequest {
    /// Quote where the user both spends the input and receives the output.
    pub fn for_user(
        chain_id: Network,
        user: Address,
        unique_pid: &str,
        input_token: Address,
        output_token: Address,
        input_amount: U256,
    ) -> Self {
        Self {
            chain_id,
            user_address: user,
            output_receiver: user,
            unique_pid: unique_pid.to_string(),
            input_token,
            output_token,
            input_amount: input_amount.to_string(),
            is_permit2: false,
        }
    }
}
