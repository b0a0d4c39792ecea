use std::time::Duration;

use async_trait::async_trait;
use error_stack::{Report, ResultExt as _, report};
use gateway_models::constants::chains::{Network, is_null_evm_address};
use gateway_models::error::Error as ModelError;
use gateway_models::network::client_rate_limit::Client;
use gateway_models::network::http::handle_reqwest_response;
use serde_json::Value;
use tokio::time::timeout;

use crate::{
    deposit::{QuoteParams, QuoteResult, QuoteSource},
    error::{Error, GatewayResult},
    routers::{
        constants::GLUEX_QUOTE_PATH,
        gluex::{
            requests::GluexQuoteRequest,
            responses::{GluexQuoteResponse, GluexQuoteResult},
        },
    },
};

const QUOTE_OK: u16 = 200;

fn quote_failed(status: u16, body: impl Into<String>) -> Report<Error> {
    report!(Error::QuoteServiceFailed {
        status,
        body: body.into(),
    })
}

#[derive(Debug, Clone)]
pub struct GluexClient {
    client: Client,
    base_url: String,
    api_key: String,
    unique_pid: String,
    timeout: Duration,
}

impl GluexClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        unique_pid: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            unique_pid: unique_pid.into(),
            timeout,
        }
    }

    pub async fn gluex_get_quote(&self, request: &GluexQuoteRequest) -> GatewayResult<GluexQuoteResult> {
        let url = format!("{}{GLUEX_QUOTE_PATH}", self.base_url.trim_end_matches('/'));

        let http_request = self
            .client
            .inner_client()
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(request)
            .build()
            .change_context(Error::Unknown)
            .attach_printable("Error building GlueX request")?;

        tracing::debug!("Fetching GlueX quote: {request:?}");

        let exchange = async {
            let response = self
                .client
                .execute(http_request)
                .await
                .map_err(|e| quote_failed(502, e.to_string()))
                .attach_printable("Error in GlueX request")?;

            handle_reqwest_response::<Value>(response)
                .await
                .map_err(|report| match report.current_context() {
                    ModelError::UpstreamStatus { status, body } => {
                        let context = Error::QuoteServiceFailed {
                            status: *status,
                            body: body.clone(),
                        };
                        report.change_context(context)
                    }
                    _ => report.change_context(Error::QuoteServiceFailed {
                        status: 502,
                        body: "Invalid response from GlueX".to_string(),
                    }),
                })
        };

        // Bounds the whole exchange, a stalled body counts as a timeout too
        let body = timeout(self.timeout, exchange)
            .await
            .map_err(|_| quote_failed(504, "GlueX quote request timed out"))??;

        handle_gluex_response(body)
    }
}

/// GlueX may answer 2xx while reporting a failure in the body's `statusCode`.
fn handle_gluex_response(body: Value) -> GatewayResult<GluexQuoteResult> {
    let response: GluexQuoteResponse = serde_json::from_value(body.clone())
        .map_err(|e| quote_failed(502, body.to_string()).attach_printable(e.to_string()))?;

    if let Some(status_code) = response.status_code
        && status_code != QUOTE_OK
    {
        tracing::error!("Error fetching GlueX quote: {body}");
        return Err(quote_failed(status_code, body.to_string()));
    }

    let result = response
        .result
        .ok_or_else(|| quote_failed(502, body.to_string()).attach_printable("Quote has no result"))?;

    if is_null_evm_address(&result.router) || result.calldata.is_empty() {
        return Err(quote_failed(502, body.to_string())
            .attach_printable("Quote is missing router or calldata"));
    }

    tracing::info!(
        "GlueX quote received: router {}, output {:?}",
        result.router,
        result.output_amount
    );
    Ok(result)
}

#[async_trait]
impl QuoteSource for GluexClient {
    async fn quote(&self, params: &QuoteParams) -> GatewayResult<QuoteResult> {
        let request = GluexQuoteRequest::for_user(
            Network::HyperEvm,
            params.user,
            &self.unique_pid,
            params.input_token,
            params.output_token,
            params.input_amount,
        );

        let result = self.gluex_get_quote(&request).await?;
        Ok(QuoteResult {
            router: result.router,
            calldata: result.calldata,
        })
    }
}
