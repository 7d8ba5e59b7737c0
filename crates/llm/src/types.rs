use serde::{Deserialize, Serialize};

/// Anthropic Messages API request
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model name (e.g., "claude-3-opus-20240229")
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Conversation turns
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl MessagesRequest {
    /// Single user turn carrying `prompt`
    pub fn user(model: impl Into<String>, max_tokens: u32, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![Message {
                role: Role::User,
                content: prompt.into(),
            }],
            temperature: None,
        }
    }
}

/// Conversation role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Anthropic Messages API response
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Response content blocks
    #[serde(default)]
    pub content: Vec<ContentBlock>,

    /// Model that produced the response
    #[serde(default)]
    pub model: String,

    /// Why generation stopped ("end_turn", "max_tokens", ...)
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessagesResponse {
    /// Text of the first text block
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// Response content block
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Error body returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}
