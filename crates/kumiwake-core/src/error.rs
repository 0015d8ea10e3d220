use thiserror::Error;

/// Errors that can occur while setting up the Kumiwake pipeline.
///
/// Extraction and grouping never fail on data quality; every field degrades
/// to its default instead. These variants only cover construction and
/// loading of external data.
#[derive(Debug, Error)]
pub enum KumiwakeError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// A detail store could not be decoded.
    #[error("failed to decode detail records: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The pipeline configuration was rejected.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Kumiwake operations.
pub type Result<T> = std::result::Result<T, KumiwakeError>;
