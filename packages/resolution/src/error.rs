//! Typed errors for the resolution library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Classification itself never fails: an unmatched mention is a pending
//! outcome, not an error. Only the I/O-bound collaborators (extractor,
//! store, loader) produce errors.

use thiserror::Error;

/// Errors that can occur during extraction and resolution.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Referenced source id absent from the store
    #[error("source not found: {source_id}")]
    SourceNotFound { source_id: String },

    /// No adapter registered for the source's declared type
    #[error("unknown source type: {source_type}")]
    UnknownSourceType { source_type: String },

    /// Extractor credentials missing or transport failure.
    ///
    /// This is a hard failure: the pipeline never silently continues
    /// without entities. Malformed model output is NOT this error; it
    /// degrades to an empty mention list instead.
    #[error("extractor unavailable: {0}")]
    ExtractorUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// One or more store writes failed while resolving a source's mentions.
    ///
    /// The engine is best-effort: every mention is attempted exactly once
    /// and failures are surfaced after the pass, never swallowed.
    #[error("store writes failed for {source_id}: {failed} of {attempted}")]
    StoreWrite {
        source_id: String,
        failed: usize,
        attempted: usize,
    },

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolutionError>;
