use futures::stream::{self, StreamExt, TryStreamExt};
use meetbrief_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

use crate::chunking::{chunk_text, TextChunk, DEFAULT_MAX_CHARS};
use crate::llm_trait::LlmClient;
use crate::prompts::PromptTemplate;

/// Separator placed between chunk summaries before the final pass
pub const SUMMARY_SEPARATOR: &str = "\n\n";

/// Summarizer for long text using map-reduce strategy
///
/// Every chunk is summarized on its own; when there is more than one chunk
/// the partial summaries are joined in chunk order and summarized once more.
/// Any model failure aborts the whole call.
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    prompt: PromptTemplate,
    max_chars: usize,
    concurrency: usize,
}

impl Summarizer {
    /// Create new summarizer with the built-in prompt and default chunk size
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            prompt: PromptTemplate::default(),
            max_chars: DEFAULT_MAX_CHARS,
            concurrency: 1,
        }
    }

    /// Create a summarizer configured from application settings
    pub fn from_config(client: Arc<dyn LlmClient>, config: &AppConfig) -> Result<Self> {
        let prompt = PromptTemplate::load(config.system_prompt_path.as_deref())?;
        Ok(Self::new(client)
            .with_prompt(prompt)
            .with_max_chars(config.chunk_max_chars)
            .with_concurrency(config.chunk_concurrency))
    }

    /// Use a custom prompt template
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Set the chunk size in characters
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    /// Set how many chunk summaries may be in flight at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Model identifier of the underlying client
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Summarize long text using map-reduce
    pub async fn summarize(&self, text: &str) -> Result<String> {
        info!("Starting summarization - Text length: {} chars", text.chars().count());

        let chunks = chunk_text(text, self.max_chars);
        if chunks.is_empty() {
            debug!("Empty transcript, nothing to summarize");
            return Ok(String::new());
        }
        info!("Split text into {} chunks", chunks.len());

        // Map phase. `buffered` yields in submission order regardless of
        // completion order; the first error drops the in-flight siblings.
        let mut summaries: Vec<String> = stream::iter(chunks.iter())
            .map(|chunk| self.summarize_chunk(chunk))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        if summaries.len() == 1 {
            return Ok(summaries.remove(0));
        }

        // Reduce phase
        let combined = summaries.join(SUMMARY_SEPARATOR);
        info!(
            "Final summary of combined text - {} partial summaries, {} chars",
            summaries.len(),
            combined.chars().count()
        );

        self.client
            .generate(&self.prompt.render(&combined))
            .instrument(info_span!("final_summary"))
            .await
    }

    /// Summarize a single chunk
    async fn summarize_chunk(&self, chunk: &TextChunk) -> Result<String> {
        info!(
            "Chunk {}/{}: {} chars",
            chunk.position,
            chunk.total,
            chunk.char_len()
        );

        let prompt = self.prompt.render(&chunk.text);
        self.client
            .generate(&prompt)
            .instrument(info_span!("chunk_summary", position = chunk.position))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use meetbrief_common::MeetbriefError;
    use std::sync::Mutex;
    use std::time::Duration;

    const TEMPLATE: &str = "SUMMARIZE[{FILE_CONTENT}]";

    /// Records prompts and answers with a caller-supplied function
    struct ScriptedClient {
        prompts: Mutex<Vec<String>>,
        respond: Box<dyn Fn(usize, &str) -> Result<String> + Send + Sync>,
    }

    impl ScriptedClient {
        fn new(respond: impl Fn(usize, &str) -> Result<String> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                respond: Box::new(respond),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn generate(&self, prompt: &str) -> Result<String> {
            let call = {
                let mut prompts = self.prompts.lock().unwrap();
                prompts.push(prompt.to_string());
                prompts.len()
            };
            (self.respond)(call, prompt)
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn summarizer(client: Arc<ScriptedClient>, max_chars: usize) -> Summarizer {
        Summarizer::new(client)
            .with_prompt(PromptTemplate::new(TEMPLATE).unwrap())
            .with_max_chars(max_chars)
    }

    #[tokio::test]
    async fn test_empty_text_makes_no_calls() {
        let client = ScriptedClient::new(|_, _| Ok("unused".to_string()));
        let result = summarizer(client.clone(), 10).summarize("").await.unwrap();
        assert_eq!(result, "");
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_single_chunk_returns_summary_unmodified() {
        let client = ScriptedClient::new(|_, _| Ok("  the summary  ".to_string()));
        let result = summarizer(client.clone(), 100)
            .summarize("short meeting")
            .await
            .unwrap();

        assert_eq!(result, "  the summary  ");
        assert_eq!(client.prompts(), vec!["SUMMARIZE[short meeting]".to_string()]);
    }

    #[tokio::test]
    async fn test_multi_chunk_reduces_in_order() {
        let client = ScriptedClient::new(|call, prompt| {
            if prompt.contains("S1") {
                Ok("FINAL".to_string())
            } else {
                Ok(format!("S{}", call))
            }
        });
        let result = summarizer(client.clone(), 4)
            .summarize("aaaabbbbcc")
            .await
            .unwrap();

        assert_eq!(result, "FINAL");
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 4);
        assert_eq!(prompts[0], "SUMMARIZE[aaaa]");
        assert_eq!(prompts[1], "SUMMARIZE[bbbb]");
        assert_eq!(prompts[2], "SUMMARIZE[cc]");
        assert_eq!(prompts[3], "SUMMARIZE[S1\n\nS2\n\nS3]");
    }

    #[tokio::test]
    async fn test_long_transcript_end_to_end() {
        let text = "x".repeat(32_000);
        let client = ScriptedClient::new(|call, _| Ok(format!("R{}", call)));
        let result = Summarizer::new(client.clone())
            .with_prompt(PromptTemplate::new(TEMPLATE).unwrap())
            .summarize(&text)
            .await
            .unwrap();

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 4);
        let sizes: Vec<_> = prompts[..3]
            .iter()
            .map(|p| p.len() - "SUMMARIZE[]".len())
            .collect();
        assert_eq!(sizes, vec![15_000, 15_000, 2_000]);
        assert_eq!(prompts[3], "SUMMARIZE[R1\n\nR2\n\nR3]");
        assert_eq!(result, "R4");
    }

    #[tokio::test]
    async fn test_chunk_failure_skips_final_call() {
        let client = ScriptedClient::new(|_, prompt| {
            if prompt.contains("bbbb") {
                Err(MeetbriefError::model("backend down"))
            } else {
                Ok("ok".to_string())
            }
        });
        let err = summarizer(client.clone(), 4)
            .summarize("aaaabbbbcccc")
            .await
            .unwrap_err();

        assert!(matches!(err, MeetbriefError::Model(ref msg) if msg == "backend down"));
        assert!(client.prompts().iter().all(|p| !p.contains("ok\n\nok")));
        assert!(client.prompts().len() <= 3);
    }

    #[tokio::test]
    async fn test_final_call_failure_propagates() {
        let client = ScriptedClient::new(|call, _| {
            if call == 3 {
                Err(MeetbriefError::model("final failed"))
            } else {
                Ok(format!("S{}", call))
            }
        });
        let err = summarizer(client.clone(), 2)
            .summarize("aabb")
            .await
            .unwrap_err();

        assert!(matches!(err, MeetbriefError::Model(_)));
        assert_eq!(client.prompts().len(), 3);
    }

    /// Answers slower for earlier chunks so completion order is reversed
    struct ReversingClient;

    #[async_trait]
    impl LlmClient for ReversingClient {
        async fn generate(&self, prompt: &str) -> Result<String> {
            let body = prompt
                .trim_start_matches("SUMMARIZE[")
                .trim_end_matches(']')
                .to_string();
            if body.contains("\n\n") {
                return Ok(body);
            }
            let delay = match body.as_str() {
                "aa" => 60,
                "bb" => 30,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(body.to_uppercase())
        }

        fn model(&self) -> &str {
            "reversing"
        }
    }

    #[tokio::test]
    async fn test_concurrent_chunks_keep_source_order() {
        let result = Summarizer::new(Arc::new(ReversingClient))
            .with_prompt(PromptTemplate::new(TEMPLATE).unwrap())
            .with_max_chars(2)
            .with_concurrency(3)
            .summarize("aabbcc")
            .await
            .unwrap();

        assert_eq!(result, "AA\n\nBB\n\nCC");
    }
}
