//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the resolution
//! library without making real LLM or storage calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{ResolutionError, Result};
use crate::glossary::Glossary;
use crate::traits::{
    extractor::{Extractor, ExtractorOutput},
    loader::{SourceLoader, SourceText},
    store::EntityStore,
};
use crate::types::{
    entity::{PendingEntity, SourceEntity},
    mention::RawMention,
    source::{SearchHit, SourceRecord, StoreStats},
};

/// A mock extractor returning scripted mentions.
///
/// Responses are keyed by exact content; unscripted content falls back
/// to the default mention list (empty unless set). Can be switched to
/// always return malformed output or to fail outright.
#[derive(Default)]
pub struct MockExtractor {
    /// Scripted mentions by exact content
    responses: Arc<RwLock<HashMap<String, Vec<RawMention>>>>,

    /// Fallback for unscripted content
    default_mentions: Arc<RwLock<Vec<RawMention>>>,

    /// Always return `ExtractorOutput::Malformed`
    malformed: bool,

    /// Always fail with `ExtractorUnavailable`
    unavailable: bool,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockExtractorCall>>>,
}

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone)]
pub struct MockExtractorCall {
    pub content_len: usize,
    pub glossary_len: usize,
    pub is_voice: bool,
}

impl MockExtractor {
    /// Create a mock extractor that returns no mentions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script mentions for exact content.
    pub fn with_response(self, content: impl Into<String>, mentions: Vec<RawMention>) -> Self {
        self.responses.write().unwrap().insert(content.into(), mentions);
        self
    }

    /// Set the fallback mention list for unscripted content.
    pub fn with_default(self, mentions: Vec<RawMention>) -> Self {
        *self.default_mentions.write().unwrap() = mentions;
        self
    }

    /// Always return malformed output.
    pub fn always_malformed(mut self) -> Self {
        self.malformed = true;
        self
    }

    /// Always fail as unavailable.
    pub fn always_unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// All calls made to this mock.
    pub fn calls(&self) -> Vec<MockExtractorCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(
        &self,
        content: &str,
        glossary: &Glossary,
        is_voice: bool,
    ) -> Result<ExtractorOutput> {
        self.calls.write().unwrap().push(MockExtractorCall {
            content_len: content.len(),
            glossary_len: glossary.len(),
            is_voice,
        });

        if self.unavailable {
            return Err(ResolutionError::ExtractorUnavailable(
                "mock extractor unavailable".into(),
            ));
        }
        if self.malformed {
            return Ok(ExtractorOutput::Malformed);
        }

        let mentions = self
            .responses
            .read()
            .unwrap()
            .get(content)
            .cloned()
            .unwrap_or_else(|| self.default_mentions.read().unwrap().clone());

        Ok(ExtractorOutput::Mentions(mentions))
    }
}

/// A mock source loader with scripted content per source id.
#[derive(Default)]
pub struct MockLoader {
    sources: Arc<RwLock<HashMap<String, SourceText>>>,

    /// Source ids that fail with `UnknownSourceType`
    unknown_types: Arc<RwLock<HashMap<String, String>>>,
}

impl MockLoader {
    /// Create an empty loader; every load fails with `SourceNotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register plain text content for a source.
    pub fn with_source(self, source_id: impl Into<String>, content: impl Into<String>) -> Self {
        self.sources
            .write()
            .unwrap()
            .insert(source_id.into(), SourceText::new(content));
        self
    }

    /// Register voice-transcribed content for a source.
    pub fn with_voice_source(
        self,
        source_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.sources
            .write()
            .unwrap()
            .insert(source_id.into(), SourceText::new(content).voice());
        self
    }

    /// Make a source fail with `UnknownSourceType`.
    pub fn with_unknown_type(
        self,
        source_id: impl Into<String>,
        source_type: impl Into<String>,
    ) -> Self {
        self.unknown_types
            .write()
            .unwrap()
            .insert(source_id.into(), source_type.into());
        self
    }
}

#[async_trait]
impl SourceLoader for MockLoader {
    async fn load(&self, source_id: &str) -> Result<SourceText> {
        if let Some(source_type) = self.unknown_types.read().unwrap().get(source_id) {
            return Err(ResolutionError::UnknownSourceType {
                source_type: source_type.clone(),
            });
        }

        self.sources
            .read()
            .unwrap()
            .get(source_id)
            .cloned()
            .ok_or_else(|| ResolutionError::SourceNotFound {
                source_id: source_id.to_string(),
            })
    }
}

/// A store wrapper that fails writes for selected mention texts.
///
/// Everything else delegates to the inner store. Used to test the
/// engine's best-effort write policy.
pub struct FailingStore<S> {
    inner: S,
    fail_mentions: HashSet<String>,
}

impl<S> FailingStore<S> {
    /// Wrap a store.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_mentions: HashSet::new(),
        }
    }

    /// Fail any link or pending write carrying this mention text.
    pub fn fail_mention(mut self, mention_text: impl Into<String>) -> Self {
        self.fail_mentions.insert(mention_text.into());
        self
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: EntityStore> EntityStore for FailingStore<S> {
    async fn add_source_entity(
        &self,
        source_id: &str,
        entity_id: &str,
        mention_text: &str,
        confidence: f64,
    ) -> Result<()> {
        if self.fail_mentions.contains(mention_text) {
            return Err(ResolutionError::Storage("injected write failure".into()));
        }
        self.inner
            .add_source_entity(source_id, entity_id, mention_text, confidence)
            .await
    }

    async fn queue_pending_entity(
        &self,
        mention_text: &str,
        source_id: &str,
        suggested_entity: Option<&str>,
        confidence: f64,
    ) -> Result<()> {
        if self.fail_mentions.contains(mention_text) {
            return Err(ResolutionError::Storage("injected write failure".into()));
        }
        self.inner
            .queue_pending_entity(mention_text, source_id, suggested_entity, confidence)
            .await
    }

    async fn upsert_source(&self, source: &SourceRecord) -> Result<()> {
        self.inner.upsert_source(source).await
    }

    async fn get_source(&self, source_id: &str) -> Result<Option<SourceRecord>> {
        self.inner.get_source(source_id).await
    }

    async fn mark_processed(&self, source_id: &str) -> Result<()> {
        self.inner.mark_processed(source_id).await
    }

    async fn upsert_summary(&self, source_id: &str, summary_text: &str) -> Result<()> {
        self.inner.upsert_summary(source_id, summary_text).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.inner.search(query).await
    }

    async fn list_sources(&self, source_type: Option<&str>) -> Result<Vec<SourceRecord>> {
        self.inner.list_sources(source_type).await
    }

    async fn source_entities(&self, source_id: &str) -> Result<Vec<SourceEntity>> {
        self.inner.source_entities(source_id).await
    }

    async fn pending_entities(&self) -> Result<Vec<PendingEntity>> {
        self.inner.pending_entities().await
    }

    async fn get_stats(&self) -> Result<StoreStats> {
        self.inner.get_stats().await
    }
}
