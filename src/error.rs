//! Error types for the WealthWise advisor

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Session Errors
    // =============================

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No financial plan yet. Please create a financial plan in the Goal Planner first.")]
    NoPlan,

    #[error("Gemini API key not configured. Please set GEMINI_API_KEY (or GOOGLE_API_KEY) in your .env file.")]
    MissingCredential,

    #[error("An error occurred: {0}")]
    ServiceFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdvisorError {
    /// Whether the error was caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(self, AdvisorError::Validation(_) | AdvisorError::NoPlan)
    }
}
