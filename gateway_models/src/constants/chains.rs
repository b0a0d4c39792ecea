use alloy_primitives::Address;
use error_stack::{ResultExt, report};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{Error, ModelResult};

pub const EVM_NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const HYPERLEND_CHAIN: &str = "hyperEvm";

/// EVM networks the gateway talks to. The lowercase name doubles as the GlueX `chainID`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Network {
    Ethereum,
    Polygon,
    HyperEvm,
}

impl Network {
    pub fn supported_networks() -> Vec<Network> {
        Network::iter().collect()
    }

    /// Decimals of the native gas token
    pub fn native_decimals(&self) -> u8 {
        match self {
            Network::Ethereum | Network::Polygon | Network::HyperEvm => 18,
        }
    }

    /// Environment variable holding the JSON-RPC endpoint for this network
    pub fn rpc_env_var(&self) -> &'static str {
        match self {
            Network::Ethereum => "ETHEREUM_RPC_URL",
            Network::Polygon => "POLYGON_RPC_URL",
            Network::HyperEvm => "HYPEREVM_RPC_URL",
        }
    }

    pub fn parse(value: &str) -> ModelResult<Self> {
        Network::from_str(value)
            .change_context(Error::ValidationError(format!("Unsupported network: {value}")))
    }
}

/// Parses an EVM address the way wallets do.
///
/// The `0x` prefix is optional and an all-lowercase or all-uppercase address is accepted as is.
/// A mixed-case address must carry a valid EIP-55 checksum.
pub fn parse_evm_address(value: &str) -> ModelResult<Address> {
    let hex = value.strip_prefix("0x").unwrap_or(value);
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(report!(Error::ValidationError(format!(
            "Invalid address: {value}"
        ))));
    }

    let address = Address::from_str(hex)
        .change_context(Error::ValidationError(format!("Invalid address: {value}")))?;

    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if &checksummed[2..] != hex {
            return Err(report!(Error::ValidationError(format!(
                "Invalid address checksum: {value}"
            ))));
        }
    }

    Ok(address)
}

pub fn is_null_evm_address(address: &Address) -> bool {
    address.is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC_BASE: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

    #[test]
    fn test_parse_checksummed_address() {
        let address = parse_evm_address(USDC_BASE).unwrap();
        assert_eq!(address.to_checksum(None), USDC_BASE);
    }

    #[test]
    fn test_parse_single_case_addresses() {
        let lower = USDC_BASE.to_lowercase();
        let upper = format!("0x{}", USDC_BASE[2..].to_uppercase());
        assert_eq!(
            parse_evm_address(&lower).unwrap(),
            parse_evm_address(&upper).unwrap()
        );
        assert!(parse_evm_address(&lower[2..]).is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        // Flip the case of a single letter
        let broken = USDC_BASE.replacen("fCD6", "fcD6", 1);
        let result = parse_evm_address(&broken);
        assert!(result.is_err());
        assert!(format!("{:?}", result.unwrap_err()).contains("checksum"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_evm_address("not-an-address").is_err());
        assert!(parse_evm_address("").is_err());
        assert!(parse_evm_address("0x1234").is_err());
        assert!(parse_evm_address("0xZZ3589fcd6edb6e08f4c7c32d4f71b54bda02913").is_err());
    }

    #[test]
    fn test_null_address() {
        let null = parse_evm_address(EVM_NULL_ADDRESS).unwrap();
        assert!(is_null_evm_address(&null));
    }

    #[test]
    fn test_network_names() {
        assert_eq!(Network::parse("ethereum").unwrap(), Network::Ethereum);
        assert_eq!(Network::parse("Polygon").unwrap(), Network::Polygon);
        assert_eq!(Network::parse("hyperevm").unwrap(), Network::HyperEvm);
        assert!(Network::parse("solana").is_err());
        assert_eq!(Network::HyperEvm.to_string(), "hyperevm");
        assert_eq!(
            serde_json::to_string(&Network::Polygon).unwrap(),
            "\"polygon\""
        );
    }

    #[test]
    fn test_network_metadata() {
        assert_eq!(Network::supported_networks().len(), 3);
        assert_eq!(Network::HyperEvm.rpc_env_var(), "HYPEREVM_RPC_URL");
        assert_eq!(Network::Ethereum.native_decimals(), 18);
    }
}
