use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use error_stack::{ResultExt as _, report};
use gateway_models::constants::chains::Network;
use gateway_models::network::client_rate_limit::Client;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    apis::{hyperlend::HyperLendClient, openai::OpenAiClient},
    config::GatewayConfig,
    deposit::DepositBuilder,
    error::{Error, GatewayResult, ModelReportExt},
    evm::rpc::{JsonRpcClient, RpcClients},
    routers::gluex::gluex::GluexClient,
};

pub mod handlers;
pub mod response;

pub type GatewayDepositBuilder = DepositBuilder<JsonRpcClient, HyperLendClient, GluexClient>;

/// Shared clients and configuration, built once at startup.
#[derive(Debug)]
pub struct AppState {
    pub config: GatewayConfig,
    http: reqwest::Client,
    rpc: RpcClients,
    gluex: Client,
}

fn missing(var: &'static str) -> error_stack::Report<Error> {
    error!("Server configuration error: Missing {var}.");
    report!(Error::ConfigurationMissing(var))
}

impl AppState {
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .change_context(Error::ConfigError("Could not build HTTP client".to_string()))?;
        let rpc = RpcClients::new(&http, &config.rpc_urls, config.external_call_timeout);
        let gluex = Client::new(http.clone(), config.gluex.rate_limit)
            .map_err(|report| report.into_gateway())?;

        Ok(Self {
            config,
            http,
            rpc,
            gluex,
        })
    }

    pub fn rpc(&self, network: Network) -> GatewayResult<&JsonRpcClient> {
        self.rpc.get(network)
    }

    /// Wires the deposit pipeline, failing if any of its credentials is unset.
    pub fn deposit_builder(&self) -> GatewayResult<GatewayDepositBuilder> {
        let rpc = self.rpc(Network::HyperEvm)?.clone();
        let api_key = self
            .config
            .gluex
            .api_key
            .clone()
            .ok_or_else(|| missing("GLUEX_API_KEY"))?;
        let unique_pid = self
            .config
            .gluex
            .unique_pid
            .clone()
            .ok_or_else(|| missing("GLUEX_UNIQUE_PID"))?;

        let timeout = self.config.external_call_timeout;
        let reserves =
            HyperLendClient::new(self.http.clone(), &self.config.hyperlend_api_url, timeout);
        let quotes = GluexClient::new(
            self.gluex.clone(),
            &self.config.gluex.api_url,
            api_key,
            unique_pid,
            timeout,
        );

        Ok(DepositBuilder::new(rpc, reserves, quotes))
    }

    pub fn openai_client(&self) -> GatewayResult<OpenAiClient> {
        let api_key = self
            .config
            .openai
            .api_key
            .clone()
            .ok_or_else(|| missing("OPENAI_API_KEY"))?;
        Ok(OpenAiClient::new(
            self.http.clone(),
            &self.config.openai.api_url,
            api_key,
            self.config.external_call_timeout,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_request_body_size;
    Router::new()
        .route("/api/lending", post(handlers::build_deposit))
        .route(
            "/api/crypto/wallet",
            get(handlers::wallet_info_query).post(handlers::wallet_info_body),
        )
        .route("/api/crypto/contracts", get(handlers::read_contract))
        .route("/api/external/openai", post(handlers::chat_completion))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(Arc::new(state))
}

pub async fn serve(config: GatewayConfig) -> GatewayResult<()> {
    let bind_address = config.bind_address;
    let app = router(AppState::new(config)?);

    let listener = TcpListener::bind(bind_address)
        .await
        .change_context(Error::ConfigError(format!("Could not bind {bind_address}")))?;
    info!("Gateway listening on {bind_address}");

    axum::serve(listener, app.into_make_service())
        .await
        .change_context(Error::Unknown)
        .attach_printable("Server stopped unexpectedly")
}
