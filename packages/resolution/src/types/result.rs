//! The per-source extraction result returned to the caller.

use serde::{Deserialize, Serialize};

use super::mention::RawMention;

/// Result of extracting and resolving entities for one source.
///
/// Invariant: `matched + pending == entities_found`. Every mention
/// yields exactly one persisted record, a link or a pending entry;
/// none are dropped silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub source_id: String,

    /// Total raw mentions returned by the extractor
    pub entities_found: usize,

    /// Mentions matched to a glossary entity (directly or via suggestion)
    pub matched: usize,

    /// Mentions queued for review
    pub pending: usize,

    /// True when the extractor replied but its output could not be
    /// parsed, so the pass degraded to zero mentions. Distinguishes
    /// "nothing found" from "could not understand the model".
    pub degraded: bool,

    /// The full raw mention list, for inspection and audit
    pub entities: Vec<RawMention>,
}

impl ExtractionResult {
    /// An empty result for a source that produced no mentions.
    pub fn empty(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            entities_found: 0,
            matched: 0,
            pending: 0,
            degraded: false,
            entities: Vec::new(),
        }
    }
}
