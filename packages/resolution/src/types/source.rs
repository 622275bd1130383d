//! Source records and store-level aggregates.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    /// Registered but not yet processed
    Pending,

    /// Entities extracted and resolved
    Processed,
}

/// Metadata for one registered source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Stable identifier, e.g. `claude_code:abc123`
    pub source_id: String,

    /// Declared adapter type, e.g. `claude_code`, `handoff`
    pub source_type: String,

    pub title: Option<String>,

    /// Path to the underlying file, if file-backed
    pub path: Option<String>,

    /// Input mode; "voice" marks voice-transcribed content
    pub input_mode: Option<String>,

    pub status: SourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,

    /// Free-form JSON metadata (tool calls, files touched, ...)
    pub metadata: Option<serde_json::Value>,
}

impl SourceRecord {
    /// Create a new pending source record.
    pub fn new(source_id: impl Into<String>, source_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            source_id: source_id.into(),
            source_type: source_type.into(),
            title: None,
            path: None,
            input_mode: None,
            status: SourceStatus::Pending,
            created_at: now,
            updated_at: now,
            processed_at: None,
            metadata: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the file path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the input mode.
    pub fn with_input_mode(mut self, mode: impl Into<String>) -> Self {
        self.input_mode = Some(mode.into());
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether this source is voice-transcribed.
    pub fn is_voice(&self) -> bool {
        self.input_mode.as_deref() == Some("voice")
    }
}

/// A full-text search hit over stored summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub source_id: String,
    pub summary_text: String,
}

/// Aggregate counts across the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_sources: usize,
    pub by_type: HashMap<String, usize>,
    pub by_status: HashMap<String, usize>,
    pub source_entities: usize,
    pub pending_entities: usize,
}
