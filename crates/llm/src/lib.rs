//! Meetbrief LLM Integration
//!
//! Anthropic API client, prompt templating and chunked map-reduce summarization

mod chunking;
mod client;
mod llm_trait;
mod prompts;
mod summarize;
mod types;

pub use chunking::{chunk_text, TextChunk, DEFAULT_MAX_CHARS};
pub use client::AnthropicClient;
pub use llm_trait::LlmClient;
pub use prompts::{PromptTemplate, BASE_PROMPT, PROMPT_PLACEHOLDER};
pub use summarize::{Summarizer, SUMMARY_SEPARATOR};
pub use types::{ContentBlock, Message, MessagesRequest, MessagesResponse, Role};
