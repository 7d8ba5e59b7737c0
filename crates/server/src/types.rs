use serde::{Deserialize, Serialize};

/// Raw prompt form (`POST /api/generate`)
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    /// Prompt passed to the model as is
    pub prompt: String,
}

/// Meeting link request (`POST /api/link`)
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    /// Link to the recorded meeting
    pub meeting_link: String,
}

/// Transcript text request (`POST /api/text`)
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// Full transcript
    pub text: String,
}

/// Model output
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Service banner
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind
    pub error: String,

    /// Human-readable description
    pub message: String,
}
