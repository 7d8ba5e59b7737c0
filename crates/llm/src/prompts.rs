//! Prompt templates for summarization

use meetbrief_common::{MeetbriefError, Result};
use std::path::Path;

/// Token replaced with the transcript text
pub const PROMPT_PLACEHOLDER: &str = "{FILE_CONTENT}";

/// Built-in template for meeting summaries
pub const BASE_PROMPT: &str = r#"You are an assistant that writes concise, factual meeting summaries.

Summarize the meeting transcript below. Use bullet points and keep these sections, in this order:
1) Topics discussed
2) Key points
3) Decisions made
4) Action items (owner and deadline when stated)
5) Open questions and risks

Stick to what the transcript says. Do not speculate or add opinions.
If the text is itself a collection of partial summaries, merge them into one summary and drop duplicates.

Transcript:
---
{FILE_CONTENT}
---"#;

/// Summarization prompt with a single placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template, rejecting text without the placeholder
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(PROMPT_PLACEHOLDER) {
            return Err(MeetbriefError::config(format!(
                "Prompt template must contain {}",
                PROMPT_PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    /// Load the template from a file, or use the built-in one
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let template = std::fs::read_to_string(path).map_err(|e| {
                    MeetbriefError::config(format!(
                        "Failed to read prompt template {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::new(template)
            }
            None => Ok(Self::default()),
        }
    }

    /// Substitute `content` at the placeholder
    pub fn render(&self, content: &str) -> String {
        self.template.replace(PROMPT_PLACEHOLDER, content)
    }

    /// Raw template text
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: BASE_PROMPT.to_string(),
        }
    }
}
