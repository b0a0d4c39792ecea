use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use error_stack::{ResultExt, report};
use gateway_models::models::contract::Erc20ViewMethod;

use crate::deposit::TokenMetadataSource;
use crate::error::{Error, GatewayResult};
use crate::evm::IERC20;
use crate::evm::rpc::JsonRpcClient;

/// Calldata for `approve(spender, amount)`.
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    Bytes::from(IERC20::approveCall { spender, amount }.abi_encode())
}

async fn call_view<C: SolCall>(
    rpc: &JsonRpcClient,
    token: Address,
    call: C,
) -> GatewayResult<C::Return> {
    let output = rpc.eth_call(token, Bytes::from(call.abi_encode())).await?;
    if output.is_empty() {
        // Calls to an address without code succeed with empty output
        return Err(report!(Error::RpcError)
            .attach_printable(format!("{token} returned no data, it may not be a contract")));
    }
    C::abi_decode_returns(&output)
        .change_context(Error::RpcError)
        .attach_printable_lazy(|| format!("Could not decode {} output", C::SIGNATURE))
}

pub async fn read_decimals(rpc: &JsonRpcClient, token: Address) -> GatewayResult<u8> {
    call_view(rpc, token, IERC20::decimalsCall {}).await
}

/// Reads an argument-less ERC-20 view function and renders its result as a string.
pub async fn read_view(
    rpc: &JsonRpcClient,
    token: Address,
    method: Erc20ViewMethod,
) -> GatewayResult<String> {
    let result = match method {
        Erc20ViewMethod::Name => call_view(rpc, token, IERC20::nameCall {}).await,
        Erc20ViewMethod::Symbol => call_view(rpc, token, IERC20::symbolCall {}).await,
        Erc20ViewMethod::Decimals => read_decimals(rpc, token).await.map(|d| d.to_string()),
        Erc20ViewMethod::TotalSupply => call_view(rpc, token, IERC20::totalSupplyCall {})
            .await
            .map(|supply| supply.to_string()),
    };
    result.change_context(Error::ContractCallFailed(method.to_string()))
}

#[async_trait]
impl TokenMetadataSource for JsonRpcClient {
    async fn token_decimals(&self, token: Address) -> GatewayResult<u8> {
        read_decimals(self, token).await
    }
}
