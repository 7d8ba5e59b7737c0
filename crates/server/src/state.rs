use meetbrief_common::{AppConfig, Result};
use meetbrief_llm::{AnthropicClient, LlmClient, Summarizer};
use meetbrief_transcribe::{MyMeetClient, Transcriber};
use std::sync::Arc;

use crate::workflow::Workflow;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Model client for raw prompts
    pub llm: Arc<dyn LlmClient>,

    /// Transcript-to-summary workflow
    pub workflow: Arc<Workflow>,
}

impl AppState {
    /// Create application state with the production backends
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm: Arc<dyn LlmClient> = Arc::new(AnthropicClient::from_config(&config)?);
        let transcriber: Arc<dyn Transcriber> = Arc::new(MyMeetClient::from_config(&config)?);
        Self::with_clients(config, llm, transcriber)
    }

    /// Create application state around explicitly supplied backends
    pub fn with_clients(
        config: AppConfig,
        llm: Arc<dyn LlmClient>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Result<Self> {
        let summarizer = Summarizer::from_config(llm.clone(), &config)?;
        let workflow = Workflow::new(transcriber, Arc::new(summarizer));

        Ok(Self {
            config,
            llm,
            workflow: Arc::new(workflow),
        })
    }
}
