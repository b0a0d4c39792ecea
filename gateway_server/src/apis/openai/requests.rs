use gateway_models::models::chat::{ChatModel, ChatRequest, DEFAULT_TEMPERATURE};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiMessage {
    pub role: String,
    pub content: String,
}

// https://platform.openai.com/docs/api-reference/chat/create
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: ChatModel,
    pub messages: Vec<OpenAiMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl From<&ChatRequest> for ChatCompletionRequest {
    fn from(request: &ChatRequest) -> Self {
        Self {
            model: request.model,
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: request.message.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
