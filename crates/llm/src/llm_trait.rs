use async_trait::async_trait;
use meetbrief_common::Result;

/// Common trait for LLM clients
///
/// Implementations return `MeetbriefError::Model` on any backend failure.
/// Retries, if any, happen inside the implementation.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier used for generation
    fn model(&self) -> &str;
}
