//! Storage trait for sources, entity links, and the review queue.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    entity::{PendingEntity, SourceEntity},
    source::{SearchHit, SourceRecord, StoreStats},
};

/// Durable store consumed by the resolution engine.
///
/// All write operations are assumed idempotent on identical input.
/// Each write is an independent, retryable-by-caller operation scoped to
/// one source; no multi-mention transaction is required. The engine
/// never retries internally.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Record a resolved mention against a canonical entity.
    async fn add_source_entity(
        &self,
        source_id: &str,
        entity_id: &str,
        mention_text: &str,
        confidence: f64,
    ) -> Result<()>;

    /// Queue an unresolved mention for review.
    async fn queue_pending_entity(
        &self,
        mention_text: &str,
        source_id: &str,
        suggested_entity: Option<&str>,
        confidence: f64,
    ) -> Result<()>;

    /// Insert or update source metadata. Idempotent; an update preserves
    /// the original creation time and processing status.
    async fn upsert_source(&self, source: &SourceRecord) -> Result<()>;

    /// Fetch a source record, or `None` if absent.
    async fn get_source(&self, source_id: &str) -> Result<Option<SourceRecord>>;

    /// Whether a source is registered.
    async fn source_exists(&self, source_id: &str) -> Result<bool> {
        Ok(self.get_source(source_id).await?.is_some())
    }

    /// Mark a source processed, stamping `processed_at`.
    async fn mark_processed(&self, source_id: &str) -> Result<()>;

    /// Insert or replace the searchable summary for a source.
    async fn upsert_summary(&self, source_id: &str, summary_text: &str) -> Result<()>;

    /// Full-text search over stored summaries, most relevant first.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// List sources, optionally filtered by type.
    async fn list_sources(&self, source_type: Option<&str>) -> Result<Vec<SourceRecord>>;

    /// Resolved links recorded for one source.
    async fn source_entities(&self, source_id: &str) -> Result<Vec<SourceEntity>>;

    /// The current review queue.
    async fn pending_entities(&self) -> Result<Vec<PendingEntity>>;

    /// Aggregate counts by type and status.
    async fn get_stats(&self) -> Result<StoreStats>;
}
