use thiserror::Error;

/// Top-level error type for Parrot.
#[derive(Debug, Error)]
pub enum ParrotError {
    /// Error from the translation service.
    #[error("translation error: {0}")]
    Translation(String),

    /// Error from the reply-posting service.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Interaction store error.
    #[error("memory error: {0}")]
    Memory(String),

    /// Secret store error.
    #[error("secrets error: {0}")]
    Secrets(String),
}
