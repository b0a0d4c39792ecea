use alloy_primitives::Address;
use error_stack::{ResultExt, report};
use serde::{Deserialize, Serialize};

use crate::constants::chains::{Network, parse_evm_address};
use crate::error::{Error, ModelResult};

/// Query string of `GET /api/crypto/wallet`, and body of the `POST` variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletInfoRequest {
    pub address: Option<String>,
    pub network: Option<String>,
}

impl WalletInfoRequest {
    /// Network defaults to Ethereum when not given.
    pub fn validate(&self) -> ModelResult<(Address, Network)> {
        let Some(address) = self.address.as_deref().filter(|s| !s.is_empty()) else {
            return Err(report!(Error::ValidationError(
                "Address parameter is required".to_string()
            )));
        };
        let address = parse_evm_address(address)
            .change_context(Error::ValidationError("Invalid Ethereum address".to_string()))?;
        let network = match self.network.as_deref() {
            Some(network) => Network::parse(network)?,
            None => Network::Ethereum,
        };
        Ok((address, network))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub address: Address,
    pub network: Network,
    /// Native balance formatted in whole units, e.g. `"1.5"`
    pub balance: String,
    pub transaction_count: u64,
    pub is_contract: bool,
}
