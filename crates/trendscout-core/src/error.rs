use thiserror::Error;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but could not be parsed.
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while validating pipeline input before any stage runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The search query is shorter than 3 characters after trimming.
    #[error("search query must be at least 3 characters")]
    QueryTooShort,

    /// The search query is longer than 120 characters after trimming.
    #[error("search query must be at most 120 characters")]
    QueryTooLong,

    /// The requested video count is outside the 10..=1000 range.
    #[error("request count must be between 10 and 1000, got {0}")]
    CountOutOfRange(usize),
}
