use crate::error::MeetbriefError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Meetbrief application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key
    #[serde(skip_serializing, default)]
    pub anthropic_api_key: String,

    /// Anthropic API base URL
    pub anthropic_base_url: String,

    /// Model identifier used for summarization
    pub llm_model: String,

    /// Maximum tokens the model may generate per call
    pub llm_max_tokens: u32,

    /// Attempts per model call before giving up
    pub llm_max_retries: u32,

    /// HTTP timeout for a single model call (seconds)
    pub llm_timeout_secs: u64,

    /// mymeet API key
    #[serde(skip_serializing, default)]
    pub mymeet_api_key: String,

    /// mymeet transcription endpoint
    pub mymeet_transcribe_url: String,

    /// HTTP timeout for a transcription request (seconds)
    pub transcribe_timeout_secs: u64,

    /// Maximum characters per transcript chunk
    pub chunk_max_chars: usize,

    /// Number of chunk summaries requested at once
    pub chunk_concurrency: usize,

    /// Optional file overriding the built-in summarization prompt
    pub system_prompt_path: Option<PathBuf>,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            llm_model: "claude-3-opus-20240229".to_string(),
            llm_max_tokens: 1024,
            llm_max_retries: 3,
            llm_timeout_secs: 300,
            mymeet_api_key: String::new(),
            mymeet_transcribe_url: "https://api.mymeet.ai/v1/transcribe".to_string(),
            transcribe_timeout_secs: 600,
            chunk_max_chars: 15_000,
            chunk_concurrency: 4,
            system_prompt_path: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, MeetbriefError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            anthropic_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or(defaults.anthropic_base_url),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_max_tokens: Self::get_env_parsed("LLM_MAX_TOKENS")
                .unwrap_or(defaults.llm_max_tokens),
            llm_max_retries: Self::get_env_parsed("LLM_MAX_RETRIES")
                .unwrap_or(defaults.llm_max_retries),
            llm_timeout_secs: Self::get_env_parsed("LLM_TIMEOUT_SECS")
                .unwrap_or(defaults.llm_timeout_secs),
            mymeet_api_key: std::env::var("MYMEET_API_KEY").unwrap_or_default(),
            mymeet_transcribe_url: std::env::var("MYMEET_TRANSCRIBE_URL")
                .unwrap_or(defaults.mymeet_transcribe_url),
            transcribe_timeout_secs: Self::get_env_parsed("TRANSCRIBE_TIMEOUT_SECS")
                .unwrap_or(defaults.transcribe_timeout_secs),
            chunk_max_chars: Self::get_env_parsed("CHUNK_MAX_CHARS")
                .unwrap_or(defaults.chunk_max_chars),
            chunk_concurrency: Self::get_env_parsed("CHUNK_CONCURRENCY")
                .unwrap_or(defaults.chunk_concurrency),
            system_prompt_path: std::env::var("SYSTEM_PROMPT_PATH").ok().map(PathBuf::from),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Parse a value from an environment variable, ignoring unparseable input
    fn get_env_parsed<T: FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), MeetbriefError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                MeetbriefError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), MeetbriefError> {
        if self.llm_model.is_empty() {
            return Err(MeetbriefError::config("LLM model name cannot be empty"));
        }

        for (name, url) in [
            ("Anthropic base URL", &self.anthropic_base_url),
            ("mymeet transcribe URL", &self.mymeet_transcribe_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(MeetbriefError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.chunk_max_chars == 0 {
            return Err(MeetbriefError::config("Chunk size must be positive"));
        }

        if self.chunk_concurrency == 0 {
            return Err(MeetbriefError::config("Chunk concurrency must be positive"));
        }

        if self.llm_max_retries == 0 {
            return Err(MeetbriefError::config("LLM retry count must be at least 1"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(MeetbriefError::config("Server port cannot be 0"));
        }

        Ok(())
    }

    /// Validate that credentials needed to reach the model backend are present
    pub fn require_model_credentials(&self) -> Result<(), MeetbriefError> {
        if self.anthropic_api_key.trim().is_empty() {
            return Err(MeetbriefError::config("ANTHROPIC_API_KEY is not set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.chunk_max_chars, 15_000);
        assert_eq!(config.llm_max_tokens, 1024);
        assert_eq!(config.llm_model, "claude-3-opus-20240229");
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid = AppConfig::default();
        invalid.chunk_max_chars = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = AppConfig::default();
        invalid.chunk_concurrency = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = AppConfig::default();
        invalid.anthropic_base_url = "api.anthropic.com".to_string();
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_require_model_credentials() {
        let mut config = AppConfig::default();
        assert!(config.require_model_credentials().is_err());

        config.anthropic_api_key = "sk-test".to_string();
        assert!(config.require_model_credentials().is_ok());
    }

    #[test]
    fn test_secrets_not_serialized() {
        let mut config = AppConfig::default();
        config.anthropic_api_key = "sk-secret".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
