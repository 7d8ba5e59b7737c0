use meetbrief_common::{MeetbriefError, Result};
use meetbrief_ingest::{is_media, read_document};
use meetbrief_llm::Summarizer;
use meetbrief_transcribe::Transcriber;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Filename used when a media upload arrives without one
const DEFAULT_MEDIA_FILENAME: &str = "media_file";

/// One piece of user input routed through the workflow
#[derive(Debug, Clone)]
pub enum Submission {
    /// Link to a recorded meeting
    MeetingLink(String),

    /// Voice, audio or video upload
    Media { filename: String, bytes: Vec<u8> },

    /// Ready transcript document (.txt, .json, .docx, .pdf)
    Document {
        filename: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },

    /// Transcript text passed directly
    Text(String),
}

impl Submission {
    /// Classify a chat text message
    ///
    /// Only links are accepted; any other text is unsupported input.
    pub fn from_message_text(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with("http") {
            Ok(Self::MeetingLink(text.to_string()))
        } else {
            Err(MeetbriefError::unsupported_input(
                "Send a meeting link, an audio/video file or a transcript document",
            ))
        }
    }

    /// Classify an uploaded file as media or document
    pub fn from_upload(
        filename: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        if is_media(content_type.as_deref(), filename.as_deref()) {
            Self::Media {
                filename: filename.unwrap_or_else(|| DEFAULT_MEDIA_FILENAME.to_string()),
                bytes,
            }
        } else {
            Self::Document {
                filename,
                content_type,
                bytes,
            }
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::MeetingLink(_) => "link",
            Self::Media { .. } => "media",
            Self::Document { .. } => "document",
            Self::Text(_) => "text",
        }
    }
}

/// Workflow executor: transcript acquisition followed by summarization
pub struct Workflow {
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<Summarizer>,
}

impl Workflow {
    /// Create new workflow
    pub fn new(transcriber: Arc<dyn Transcriber>, summarizer: Arc<Summarizer>) -> Self {
        Self {
            transcriber,
            summarizer,
        }
    }

    /// Model identifier used for summaries
    pub fn model(&self) -> &str {
        self.summarizer.model()
    }

    /// Produce the final summary for a submission
    pub async fn execute(&self, submission: Submission) -> Result<String> {
        let request_id = Uuid::new_v4();
        let span = info_span!("workflow", %request_id, input = submission.label());

        async move {
            let transcript = self.transcript(submission).await?;
            let summary = self.summarizer.summarize(&transcript).await?;
            info!("Workflow completed - Summary length: {} chars", summary.chars().count());
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Obtain transcript text for a submission
    pub async fn transcript(&self, submission: Submission) -> Result<String> {
        match submission {
            Submission::MeetingLink(link) => self.transcriber.transcribe_link(&link).await,
            Submission::Media { filename, bytes } => {
                self.transcriber.transcribe_media(bytes, &filename).await
            }
            Submission::Document {
                filename,
                content_type,
                bytes,
            } => {
                // docx/pdf parsing is CPU-bound
                tokio::task::spawn_blocking(move || {
                    read_document(content_type.as_deref(), filename.as_deref(), &bytes)
                })
                .await
                .map_err(|e| anyhow::anyhow!("Document reader task failed: {}", e))?
            }
            Submission::Text(text) => Ok(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeLlm, FakeTranscriber};

    fn workflow(llm: Arc<FakeLlm>, transcriber: Arc<FakeTranscriber>) -> Workflow {
        Workflow::new(transcriber, Arc::new(llm.summarizer(10)))
    }

    #[test]
    fn test_message_text_classification() {
        assert!(matches!(
            Submission::from_message_text("  https://meet.example/x "),
            Ok(Submission::MeetingLink(ref l)) if l == "https://meet.example/x"
        ));
        assert!(matches!(
            Submission::from_message_text("summarize please"),
            Err(MeetbriefError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn test_upload_classification() {
        let voice = Submission::from_upload(None, Some("audio/ogg".into()), vec![1]);
        assert!(matches!(voice, Submission::Media { ref filename, .. } if filename == "media_file"));

        let doc = Submission::from_upload(Some("notes.docx".into()), None, vec![1]);
        assert_eq!(doc.label(), "document");
    }

    #[tokio::test]
    async fn test_link_is_transcribed_then_summarized() {
        let llm = FakeLlm::echo();
        let transcriber = FakeTranscriber::returning("short talk");
        let summary = workflow(llm.clone(), transcriber.clone())
            .execute(Submission::MeetingLink("https://meet.example/x".into()))
            .await
            .unwrap();

        assert_eq!(summary, "summary of: short talk");
        assert_eq!(transcriber.calls(), vec!["link:https://meet.example/x".to_string()]);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_document_is_read_then_summarized() {
        let llm = FakeLlm::echo();
        let transcriber = FakeTranscriber::returning("unused");
        let summary = workflow(llm, transcriber.clone())
            .execute(Submission::from_upload(
                Some("t.json".into()),
                Some("application/json".into()),
                br#"{"transcript": "hello"}"#.to_vec(),
            ))
            .await
            .unwrap();

        assert_eq!(summary, "summary of: hello");
        assert!(transcriber.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transcription_failure_skips_model() {
        let llm = FakeLlm::echo();
        let transcriber = FakeTranscriber::failing();
        let err = workflow(llm.clone(), transcriber)
            .execute(Submission::from_upload(Some("call.mp3".into()), None, vec![0; 8]))
            .await
            .unwrap_err();

        assert!(matches!(err, MeetbriefError::Transcription(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_document_skips_model() {
        let llm = FakeLlm::echo();
        let err = workflow(llm.clone(), FakeTranscriber::returning("unused"))
            .execute(Submission::from_upload(
                Some("photo.png".into()),
                Some("image/png".into()),
                vec![0x89, 0x50],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, MeetbriefError::UnsupportedInput(_)));
        assert_eq!(llm.calls(), 0);
    }
}
