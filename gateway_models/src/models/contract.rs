use alloy_primitives::Address;
use error_stack::{ResultExt, report};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::constants::chains::{Network, parse_evm_address};
use crate::error::{Error, ModelResult};

/// Argument-less ERC-20 view functions that can be read through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Erc20ViewMethod {
    Name,
    Symbol,
    Decimals,
    TotalSupply,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractReadQuery {
    pub contract_address: Option<String>,
    pub method: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedContractRead {
    pub contract_address: Address,
    pub method: Erc20ViewMethod,
    pub network: Network,
}

impl ContractReadQuery {
    pub fn validate(&self) -> ModelResult<ValidatedContractRead> {
        let (Some(contract_address), Some(method)) = (
            self.contract_address.as_deref().filter(|s| !s.is_empty()),
            self.method.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(report!(Error::ValidationError(
                "contractAddress and method are required".to_string()
            )));
        };

        let contract_address = parse_evm_address(contract_address).change_context(
            Error::ValidationError("Invalid contractAddress".to_string()),
        )?;
        let method = method.parse::<Erc20ViewMethod>().change_context(Error::ValidationError(
            format!("Method {method} not found or failed to execute"),
        ))?;
        let network = match self.network.as_deref() {
            Some(network) => Network::parse(network)?,
            None => Network::Ethereum,
        };

        Ok(ValidatedContractRead {
            contract_address,
            method,
            network,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractReadResponse {
    pub contract_address: Address,
    pub method: Erc20ViewMethod,
    /// Return value rendered as a string
    pub result: String,
    pub network: Network,
}
