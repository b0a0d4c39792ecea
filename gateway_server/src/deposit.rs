use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use error_stack::ResultExt as _;
use gateway_models::models::deposit::ValidatedDeposit;
use gateway_models::models::transaction::{DepositTransactions, TransactionCall};
use tracing::{debug, info};

use crate::error::{Error, GatewayResult};
use crate::evm::erc20::encode_approve;
use crate::utils::number_conversion::decimal_to_base_units;

/// On-chain token metadata.
#[async_trait]
pub trait TokenMetadataSource: Send + Sync {
    async fn token_decimals(&self, token: Address) -> GatewayResult<u8>;
}

/// Maps an underlying asset to the receipt token of its lending reserve.
#[async_trait]
pub trait ReserveSource: Send + Sync {
    async fn receipt_token(&self, underlying: Address) -> GatewayResult<Address>;
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, params: &QuoteParams) -> GatewayResult<QuoteResult>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub user: Address,
    pub input_token: Address,
    pub output_token: Address,
    /// In the input token's base units
    pub input_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResult {
    pub router: Address,
    pub calldata: Bytes,
}

/// Builds the approve + swap calls that deposit a token into its lending reserve.
///
/// Every step runs in sequence and the first failure aborts the build,
/// so a partial transaction list is never produced.
pub struct DepositBuilder<T, R, Q> {
    tokens: T,
    reserves: R,
    quotes: Q,
}

impl<T, R, Q> DepositBuilder<T, R, Q>
where
    T: TokenMetadataSource,
    R: ReserveSource,
    Q: QuoteSource,
{
    pub fn new(tokens: T, reserves: R, quotes: Q) -> Self {
        Self {
            tokens,
            reserves,
            quotes,
        }
    }

    pub async fn build(&self, deposit: &ValidatedDeposit) -> GatewayResult<DepositTransactions> {
        info!(
            "Building deposit of {} {} for {}",
            deposit.amount, deposit.input_token, deposit.user
        );

        let decimals = self
            .tokens
            .token_decimals(deposit.input_token)
            .await
            .change_context(Error::TokenQueryFailed)
            .attach_printable_lazy(|| format!("Token: {}", deposit.input_token))?;
        debug!("Token {} has {decimals} decimals", deposit.input_token);

        let input_amount = decimal_to_base_units(deposit.amount, decimals)?;
        debug!("Scaled amount: {input_amount}");

        let output_token = self.reserves.receipt_token(deposit.input_token).await?;
        info!("Receipt token for {}: {output_token}", deposit.input_token);

        let quote = self
            .quotes
            .quote(&QuoteParams {
                user: deposit.user,
                input_token: deposit.input_token,
                output_token,
                input_amount,
            })
            .await?;
        info!("Quote received, router {}", quote.router);

        let approval = TransactionCall::without_value(
            deposit.input_token,
            encode_approve(quote.router, input_amount),
        );
        let swap = TransactionCall::without_value(quote.router, quote.calldata);

        Ok(DepositTransactions { approval, swap })
    }
}
