use thiserror::Error;

/// Convenience alias used across the blokify crates.
pub type Result<T> = std::result::Result<T, BlokifyError>;

/// Errors surfaced by the transformation pipeline.
#[derive(Debug, Error)]
pub enum BlokifyError {
    /// The story context (or other caller input) was absent or unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A document could not be turned into JSON text.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl BlokifyError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether this error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
