use std::time::Duration;

use error_stack::{ResultExt as _, report};
use gateway_models::models::chat::{ChatRequest, ChatResponse};
use gateway_models::network::http::handle_reqwest_response;
use tokio::time::timeout;

use crate::{
    apis::openai::{requests::ChatCompletionRequest, responses::ChatCompletionResponse},
    error::{Error, GatewayResult, ModelReportExt},
};

pub mod requests;
pub mod responses;

pub const OPENAI_BASE_API_URL: &str = "https://api.openai.com";

const NO_RESPONSE: &str = "No response";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    pub async fn chat_completion(&self, request: &ChatRequest) -> GatewayResult<ChatResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatCompletionRequest::from(request);

        let exchange = async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    report!(Error::UpstreamFailed {
                        status: 502,
                        body: e.to_string(),
                    })
                })
                .attach_printable("Error in OpenAI request")?;

            handle_reqwest_response::<ChatCompletionResponse>(response)
                .await
                .map_err(|report| {
                    tracing::error!("OpenAI API error: {report:?}");
                    report.into_gateway()
                })
        };

        let completion = timeout(self.timeout, exchange).await.map_err(|_| {
            report!(Error::UpstreamFailed {
                status: 504,
                body: "OpenAI request timed out".to_string(),
            })
        })??;

        Ok(into_chat_response(completion))
    }
}

fn into_chat_response(completion: ChatCompletionResponse) -> ChatResponse {
    let message = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_else(|| NO_RESPONSE.to_string());

    ChatResponse {
        message,
        usage: completion.usage,
        model: completion.model,
    }
}
