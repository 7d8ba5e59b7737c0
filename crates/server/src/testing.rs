//! In-process fakes for the model and transcription backends

use async_trait::async_trait;
use meetbrief_common::{MeetbriefError, Result};
use meetbrief_llm::{LlmClient, PromptTemplate, Summarizer};
use meetbrief_transcribe::Transcriber;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Answers `summary of: <prompt>`
pub struct FakeLlm {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeLlm {
    pub fn echo() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Summarizer whose prompt is the transcript itself
    pub fn summarizer(self: &Arc<Self>, max_chars: usize) -> Summarizer {
        Summarizer::new(self.clone())
            .with_prompt(PromptTemplate::new("{FILE_CONTENT}").expect("valid template"))
            .with_max_chars(max_chars)
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MeetbriefError::model("backend unavailable"));
        }
        Ok(format!("summary of: {}", prompt))
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// Records requests and returns a fixed transcript (or fails)
pub struct FakeTranscriber {
    transcript: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeTranscriber {
    pub fn returning(transcript: &str) -> Arc<Self> {
        Arc::new(Self {
            transcript: Some(transcript.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            transcript: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<String> {
        self.transcript
            .clone()
            .ok_or_else(|| MeetbriefError::transcription("mymeet API error (500)"))
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe_link(&self, meeting_link: &str) -> Result<String> {
        self.calls.lock().unwrap().push(format!("link:{}", meeting_link));
        self.answer()
    }

    async fn transcribe_media(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("media:{}:{}", filename, bytes.len()));
        self.answer()
    }
}
