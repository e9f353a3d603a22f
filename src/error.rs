use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rubric pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Text too short for analysis ({length} characters, minimum {minimum})")]
    InsufficientText { length: usize, minimum: usize },

    #[error("Text too long for analysis ({length} characters, maximum {maximum})")]
    TextTooLong { length: usize, maximum: usize },

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors the pipeline absorbs with a fallback instead of surfacing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ResourceUnavailable(_) | Error::DegenerateInput(_))
    }
}
