//! Persisted entity records: resolved links and the review queue.

use serde::{Deserialize, Serialize};

/// A resolved link between a source and a canonical entity.
///
/// Multiple mentions of the same entity within one source each produce a
/// separate link; deduplication within a source is not this layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntity {
    pub source_id: String,

    /// Canonical entity id from the glossary
    pub entity_id: String,

    /// The original mention text, even when the match came via the
    /// extractor's suggested canonical form
    pub mention_text: String,

    /// Numeric confidence score
    pub confidence: f64,
}

/// An unresolved mention queued for human review.
///
/// Created when neither the mention nor its suggestion resolves against
/// the glossary. Resolved or deleted by an external review process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEntity {
    pub mention_text: String,
    pub source_id: String,

    /// The extractor's unresolved canonical guess, if it made one
    pub suggested_entity: Option<String>,

    /// Numeric confidence score
    pub confidence: f64,
}
