//! Raw mentions: the extractor's wire schema.
//!
//! A raw mention is ephemeral. It is produced per extraction call,
//! consumed immediately by the resolution engine, and never persisted in
//! raw form.

use serde::{Deserialize, Serialize};

/// A raw entity mention as returned by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMention {
    /// Exact text observed in the source
    pub mention: String,

    /// Extractor confidence: "high", "medium", or "low"
    #[serde(default = "default_confidence")]
    pub confidence: String,

    /// The extractor's best guess at the canonical form, if any
    #[serde(default)]
    pub suggested_canonical: Option<String>,

    /// Free-text justification. Stored for audit, never used in
    /// classification.
    #[serde(default)]
    pub reasoning: String,
}

fn default_confidence() -> String {
    "medium".to_string()
}

impl RawMention {
    /// Create a mention with default (medium) confidence.
    pub fn new(mention: impl Into<String>) -> Self {
        Self {
            mention: mention.into(),
            confidence: default_confidence(),
            suggested_canonical: None,
            reasoning: String::new(),
        }
    }

    /// Set the confidence label.
    pub fn with_confidence(mut self, confidence: impl Into<String>) -> Self {
        self.confidence = confidence.into();
        self
    }

    /// Set the suggested canonical name.
    pub fn with_suggestion(mut self, suggested: impl Into<String>) -> Self {
        self.suggested_canonical = Some(suggested.into());
        self
    }

    /// Set the reasoning text.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Numeric confidence score for storage.
    pub fn score(&self) -> f64 {
        confidence_score(&self.confidence)
    }
}

/// Map a confidence label to its numeric score.
///
/// high -> 0.9, medium -> 0.6, low -> 0.3, anything else -> 0.5.
/// Case-insensitive on the three recognized labels. Pure.
pub fn confidence_score(confidence: &str) -> f64 {
    match confidence.trim().to_lowercase().as_str() {
        "high" => 0.9,
        "medium" => 0.6,
        "low" => 0.3,
        _ => 0.5,
    }
}
