use error_stack::report;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ModelResult};

pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatModel {
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

/// Body of `POST /api/external/openai`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: ChatModel,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ChatRequest {
    pub fn validate(&self) -> ModelResult<()> {
        if self.message.trim().is_empty() {
            return Err(report!(Error::ValidationError(
                "message must not be empty".to_string()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub message: String,
    pub usage: Value,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_defaults() {
        let request: ChatRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert_eq!(request.model, ChatModel::Gpt35Turbo);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_chat_request_model_names() {
        let request: ChatRequest =
            serde_json::from_value(json!({ "message": "hi", "model": "gpt-4-turbo", "maxTokens": 10 }))
                .unwrap();
        assert_eq!(request.model, ChatModel::Gpt4Turbo);
        assert_eq!(request.max_tokens, 10);
        assert_eq!(serde_json::to_value(ChatModel::Gpt4).unwrap(), json!("gpt-4"));
    }

    #[test]
    fn test_chat_request_rejects_unknown_model() {
        let result =
            serde_json::from_value::<ChatRequest>(json!({ "message": "hi", "model": "davinci" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_request_rejects_empty_message() {
        let request: ChatRequest = serde_json::from_value(json!({ "message": "" })).unwrap();
        assert!(request.validate().is_err());
    }
}
