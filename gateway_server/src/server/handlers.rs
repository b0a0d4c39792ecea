use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
};
use gateway_models::models::{
    api_response::DepositResponse,
    chat::{ChatRequest, ChatResponse},
    contract::{ContractReadQuery, ContractReadResponse},
    deposit::DepositRequest,
    wallet::{WalletInfo, WalletInfoRequest},
};
use gateway_models::network::{DEFAULT_MAX_JSON_DEPTH, validate_and_parse_json};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::{GatewayResult, ModelReportExt},
    evm::erc20::read_view,
    server::{AppState, response::ApiError},
    utils::number_conversion::format_units,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

fn parse_body<T: DeserializeOwned>(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> GatewayResult<T> {
    let body = body.map_err(|rejection| ApiError::from(rejection).0)?;
    validate_and_parse_json(
        &body,
        state.config.max_request_body_size,
        DEFAULT_MAX_JSON_DEPTH,
    )
    .map_err(|report| report.into_gateway())
}

/// `POST /api/lending`
pub async fn build_deposit(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<DepositResponse> {
    let request: DepositRequest = parse_body(&state, body)?;
    let deposit = request.validate().map_err(|report| report.into_gateway())?;

    let builder = state.deposit_builder()?;
    let transactions = builder.build(&deposit).await?;

    info!(
        "Deposit transactions built for {} ({} {})",
        deposit.user, deposit.amount, deposit.input_token
    );
    Ok(Json(DepositResponse::success(transactions.into_ordered())))
}

/// `GET /api/crypto/wallet`
pub async fn wallet_info_query(
    State(state): State<Arc<AppState>>,
    query: Result<Query<WalletInfoRequest>, QueryRejection>,
) -> ApiResult<WalletInfo> {
    let Query(request) = query?;
    Ok(Json(load_wallet_info(&state, &request).await?))
}

/// `POST /api/crypto/wallet`
pub async fn wallet_info_body(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<WalletInfo> {
    let request: WalletInfoRequest = parse_body(&state, body)?;
    Ok(Json(load_wallet_info(&state, &request).await?))
}

async fn load_wallet_info(state: &AppState, request: &WalletInfoRequest) -> GatewayResult<WalletInfo> {
    let (address, network) = request.validate().map_err(|report| report.into_gateway())?;
    let rpc = state.rpc(network)?;

    let (balance, transaction_count, code) = tokio::try_join!(
        rpc.get_balance(address),
        rpc.get_transaction_count(address),
        rpc.get_code(address),
    )?;

    Ok(WalletInfo {
        address,
        network,
        balance: format_units(balance, network.native_decimals()),
        transaction_count,
        is_contract: !code.is_empty(),
    })
}

/// `GET /api/crypto/contracts`
pub async fn read_contract(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ContractReadQuery>, QueryRejection>,
) -> ApiResult<ContractReadResponse> {
    let Query(query) = query?;
    let read = query.validate().map_err(|report| report.into_gateway())?;
    let rpc = state.rpc(read.network)?;

    let result = read_view(rpc, read.contract_address, read.method).await?;

    Ok(Json(ContractReadResponse {
        contract_address: read.contract_address,
        method: read.method,
        result,
        network: read.network,
    }))
}

/// `POST /api/external/openai`
pub async fn chat_completion(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<ChatResponse> {
    let request: ChatRequest = parse_body(&state, body)?;
    request.validate().map_err(|report| report.into_gateway())?;

    let client = state.openai_client()?;
    Ok(Json(client.chat_completion(&request).await?))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
