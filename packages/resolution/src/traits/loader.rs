//! Source loader trait: map a source id to its full text.

use async_trait::async_trait;

use crate::error::Result;

/// Loaded source content plus the voice flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceText {
    /// Flat text blob produced by the source-type adapter
    pub content: String,

    /// Whether the content is voice-transcribed
    pub is_voice: bool,
}

impl SourceText {
    /// Create non-voice source text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_voice: false,
        }
    }

    /// Mark as voice-transcribed.
    pub fn voice(mut self) -> Self {
        self.is_voice = true;
        self
    }
}

/// Maps a source identifier to full text content.
///
/// Implementations dispatch on the source's declared type to the
/// matching adapter. Fails with `SourceNotFound` when the source record
/// or underlying file is missing, and `UnknownSourceType` when no
/// adapter is registered for the declared type.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    /// Load the full text for a source.
    async fn load(&self, source_id: &str) -> Result<SourceText>;
}
