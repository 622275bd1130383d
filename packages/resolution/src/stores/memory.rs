//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ResolutionError, Result};
use crate::traits::store::EntityStore;
use crate::types::{
    entity::{PendingEntity, SourceEntity},
    source::{SearchHit, SourceRecord, SourceStatus, StoreStats},
};

/// In-memory entity store.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
///
/// Pending entries are keyed by `(source_id, mention_text)`, so
/// re-processing a source updates queue entries in place instead of
/// duplicating them. Source-entity links are intentionally not
/// deduplicated; repeated mentions each keep their own link.
#[derive(Default)]
pub struct MemoryStore {
    sources: RwLock<HashMap<String, SourceRecord>>,
    summaries: RwLock<HashMap<String, String>>,
    entities: RwLock<Vec<SourceEntity>>,
    pending: RwLock<HashMap<(String, String), PendingEntity>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.sources.write().unwrap().clear();
        self.summaries.write().unwrap().clear();
        self.entities.write().unwrap().clear();
        self.pending.write().unwrap().clear();
    }

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.read().unwrap().len()
    }

    /// Number of resolved source-entity links.
    pub fn entity_count(&self) -> usize {
        self.entities.read().unwrap().len()
    }

    /// Number of queued pending entities.
    pub fn pending_count(&self) -> usize {
        self.pending.read().unwrap().len()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn add_source_entity(
        &self,
        source_id: &str,
        entity_id: &str,
        mention_text: &str,
        confidence: f64,
    ) -> Result<()> {
        self.entities.write().unwrap().push(SourceEntity {
            source_id: source_id.to_string(),
            entity_id: entity_id.to_string(),
            mention_text: mention_text.to_string(),
            confidence,
        });
        Ok(())
    }

    async fn queue_pending_entity(
        &self,
        mention_text: &str,
        source_id: &str,
        suggested_entity: Option<&str>,
        confidence: f64,
    ) -> Result<()> {
        let key = (source_id.to_string(), mention_text.to_string());
        self.pending.write().unwrap().insert(
            key,
            PendingEntity {
                mention_text: mention_text.to_string(),
                source_id: source_id.to_string(),
                suggested_entity: suggested_entity.map(str::to_string),
                confidence,
            },
        );
        Ok(())
    }

    async fn upsert_source(&self, source: &SourceRecord) -> Result<()> {
        let mut sources = self.sources.write().unwrap();
        match sources.get_mut(&source.source_id) {
            Some(existing) => {
                // Update preserves creation time and processing status
                existing.source_type = source.source_type.clone();
                existing.title = source.title.clone();
                existing.path = source.path.clone();
                existing.input_mode = source.input_mode.clone();
                existing.metadata = source.metadata.clone();
                existing.updated_at = Utc::now();
            }
            None => {
                sources.insert(source.source_id.clone(), source.clone());
            }
        }
        Ok(())
    }

    async fn get_source(&self, source_id: &str) -> Result<Option<SourceRecord>> {
        Ok(self.sources.read().unwrap().get(source_id).cloned())
    }

    async fn mark_processed(&self, source_id: &str) -> Result<()> {
        let mut sources = self.sources.write().unwrap();
        let source = sources
            .get_mut(source_id)
            .ok_or_else(|| ResolutionError::SourceNotFound {
                source_id: source_id.to_string(),
            })?;

        source.status = SourceStatus::Processed;
        source.processed_at = Some(Utc::now());
        source.updated_at = Utc::now();
        Ok(())
    }

    async fn upsert_summary(&self, source_id: &str, summary_text: &str) -> Result<()> {
        self.summaries
            .write()
            .unwrap()
            .insert(source_id.to_string(), summary_text.to_string());
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let summaries = self.summaries.read().unwrap();
        let query_lower = query.to_lowercase();
        let terms: Vec<&str> = query_lower.split_whitespace().collect();

        let mut scored: Vec<(usize, SearchHit)> = summaries
            .iter()
            .filter_map(|(source_id, text)| {
                let text_lower = text.to_lowercase();
                let hits: usize = terms.iter().map(|t| text_lower.matches(t).count()).sum();
                if hits > 0 {
                    Some((
                        hits,
                        SearchHit {
                            source_id: source_id.clone(),
                            summary_text: text.clone(),
                        },
                    ))
                } else {
                    None
                }
            })
            .collect();

        // Most hits first, ties broken by source id for determinism
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.source_id.cmp(&b.1.source_id)));

        Ok(scored.into_iter().map(|(_, hit)| hit).collect())
    }

    async fn list_sources(&self, source_type: Option<&str>) -> Result<Vec<SourceRecord>> {
        let mut sources: Vec<SourceRecord> = self
            .sources
            .read()
            .unwrap()
            .values()
            .filter(|s| source_type.map_or(true, |t| s.source_type == t))
            .cloned()
            .collect();

        sources.sort_by(|a, b| a.source_id.cmp(&b.source_id));
        Ok(sources)
    }

    async fn source_entities(&self, source_id: &str) -> Result<Vec<SourceEntity>> {
        Ok(self
            .entities
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.source_id == source_id)
            .cloned()
            .collect())
    }

    async fn pending_entities(&self) -> Result<Vec<PendingEntity>> {
        let mut queue: Vec<PendingEntity> =
            self.pending.read().unwrap().values().cloned().collect();
        queue.sort_by(|a, b| {
            a.source_id
                .cmp(&b.source_id)
                .then(a.mention_text.cmp(&b.mention_text))
        });
        Ok(queue)
    }

    async fn get_stats(&self) -> Result<StoreStats> {
        let sources = self.sources.read().unwrap();

        let mut by_type: HashMap<String, usize> = HashMap::new();
        let mut by_status: HashMap<String, usize> = HashMap::new();
        for source in sources.values() {
            *by_type.entry(source.source_type.clone()).or_default() += 1;
            let status = match source.status {
                SourceStatus::Pending => "pending",
                SourceStatus::Processed => "processed",
            };
            *by_status.entry(status.to_string()).or_default() += 1;
        }

        Ok(StoreStats {
            total_sources: sources.len(),
            by_type,
            by_status,
            source_entities: self.entities.read().unwrap().len(),
            pending_entities: self.pending.read().unwrap().len(),
        })
    }
}
