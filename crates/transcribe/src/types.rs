use async_trait::async_trait;
use meetbrief_common::Result;
use serde::{Deserialize, Serialize};

/// Speech-to-text capability for meeting links and uploaded media
///
/// Implementations return `MeetbriefError::Transcription` on any failure.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a meeting given by its link
    async fn transcribe_link(&self, meeting_link: &str) -> Result<String>;

    /// Transcribe an uploaded voice/audio/video file
    async fn transcribe_media(&self, bytes: Vec<u8>, filename: &str) -> Result<String>;
}

/// Link transcription request body
#[derive(Debug, Clone, Serialize)]
pub struct LinkRequest<'a> {
    pub meeting_link: &'a str,
}

/// Transcription response body
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResponse {
    /// Transcript text (absent or empty when the service found nothing)
    #[serde(default)]
    pub transcript: Option<String>,
}

impl TranscriptResponse {
    /// Non-empty transcript, if any
    pub fn into_transcript(self) -> Option<String> {
        self.transcript.filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript_is_none() {
        let resp: TranscriptResponse = serde_json::from_str(r#"{"transcript": "  "}"#).unwrap();
        assert_eq!(resp.into_transcript(), None);

        let resp: TranscriptResponse = serde_json::from_str(r#"{"status": "done"}"#).unwrap();
        assert_eq!(resp.into_transcript(), None);
    }

    #[test]
    fn test_link_request_shape() {
        let body = serde_json::to_value(LinkRequest {
            meeting_link: "https://meet.example/abc",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"meeting_link": "https://meet.example/abc"}));
    }
}
