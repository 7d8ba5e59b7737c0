/// Meetbrief error types
#[derive(Debug, thiserror::Error)]
pub enum MeetbriefError {
    /// Input format could not be classified
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Input format recognized but structurally invalid
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Upstream transcription service failed
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Language model backend failed
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeetbriefError {
    /// Create unsupported input error
    pub fn unsupported_input<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    /// Create malformed input error
    pub fn malformed_input<S: Into<String>>(msg: S) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create transcription error
    pub fn transcription<S: Into<String>>(msg: S) -> Self {
        Self::Transcription(msg.into())
    }

    /// Create model error
    pub fn model<S: Into<String>>(msg: S) -> Self {
        Self::Model(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by the submitted input rather than by a dependency
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedInput(_) | Self::MalformedInput(_))
    }
}

// HTTP response conversion
impl MeetbriefError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnsupportedInput(_) => 400,
            Self::MalformedInput(_) => 400,
            Self::Transcription(_) => 502,
            Self::Model(_) => 502,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 500,
            Self::Other(_) => 500,
        }
    }

    /// Stable machine-readable label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedInput(_) => "unsupported_input",
            Self::MalformedInput(_) => "malformed_input",
            Self::Transcription(_) => "transcription",
            Self::Model(_) => "model",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Other(_) => "internal",
        }
    }
}
