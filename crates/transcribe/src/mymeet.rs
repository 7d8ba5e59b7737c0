use async_trait::async_trait;
use meetbrief_common::{AppConfig, MeetbriefError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::types::{LinkRequest, Transcriber, TranscriptResponse};

/// mymeet transcription API client
#[derive(Debug, Clone)]
pub struct MyMeetClient {
    transcribe_url: String,
    api_key: String,
    client: Client,
}

impl MyMeetClient {
    /// Create new mymeet client
    pub fn new(
        transcribe_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let transcribe_url = transcribe_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MeetbriefError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("mymeet client initialized: {}", transcribe_url);
        Ok(Self {
            transcribe_url,
            api_key: api_key.into(),
            client,
        })
    }

    /// Build a client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if config.mymeet_api_key.trim().is_empty() {
            warn!("MYMEET_API_KEY is not set; transcription requests will be unauthenticated");
        }
        Self::new(
            &config.mymeet_transcribe_url,
            &config.mymeet_api_key,
            Duration::from_secs(config.transcribe_timeout_secs),
        )
    }

    /// Send a prepared request and pull the transcript out of the response
    async fn send(&self, request: RequestBuilder, source: &str) -> Result<String> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| MeetbriefError::transcription(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MeetbriefError::transcription(format!(
                "mymeet API error ({}): {}",
                status, body
            )));
        }

        let result: TranscriptResponse = response.json().await.map_err(|e| {
            MeetbriefError::transcription(format!("Failed to parse response: {}", e))
        })?;

        let transcript = result
            .into_transcript()
            .ok_or_else(|| MeetbriefError::transcription("Transcript not found in response"))?;

        info!("Transcription of {} completed - {} chars", source, transcript.chars().count());
        Ok(transcript)
    }
}

#[async_trait]
impl Transcriber for MyMeetClient {
    async fn transcribe_link(&self, meeting_link: &str) -> Result<String> {
        debug!("Requesting transcription for link: {}", meeting_link);
        let request = self
            .client
            .post(&self.transcribe_url)
            .json(&LinkRequest { meeting_link });
        self.send(request, "meeting link").await
    }

    async fn transcribe_media(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        debug!("Uploading media for transcription: {} ({} bytes)", filename, bytes.len());
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| MeetbriefError::transcription(format!("Invalid upload part: {}", e)))?;
        let request = self
            .client
            .post(&self.transcribe_url)
            .multipart(Form::new().part("file", part));
        self.send(request, filename).await
    }
}
