//! The extraction pipeline: orchestrates loader, extractor, engine, and store.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{ResolutionError, Result};
use crate::glossary::Glossary;
use crate::pipeline::resolve::resolve_mentions;
use crate::traits::{
    extractor::Extractor,
    loader::SourceLoader,
    store::EntityStore,
};
use crate::types::result::ExtractionResult;

/// Outcome of one source within a batch run.
#[derive(Debug)]
pub struct SourceOutcome {
    pub source_id: String,
    pub result: Result<ExtractionResult>,
}

/// The main entry point: extract entities from sources and resolve them
/// against a glossary snapshot.
///
/// The glossary is an immutable `Arc` snapshot taken at construction, so
/// any number of pipelines (or clones of one) can run concurrently over
/// the same glossary. Reloading the glossary means constructing a new
/// pipeline between passes, never swapping it mid-pass.
///
/// # Example
///
/// ```rust,ignore
/// use resolution::{Glossary, MemoryStore, Pipeline};
/// use resolution::extractors::AnthropicExtractor;
///
/// let glossary = Arc::new(Glossary::from_json(&json)?);
/// let pipeline = Pipeline::new(glossary, MemoryStore::new(), AnthropicExtractor::from_env()?);
///
/// let result = pipeline.process_source("claude_code:abc123", &loader).await?;
/// println!("{} matched, {} pending", result.matched, result.pending);
/// ```
pub struct Pipeline<S: EntityStore, E: Extractor> {
    glossary: Arc<Glossary>,
    store: S,
    extractor: E,
}

impl<S: EntityStore, E: Extractor> Pipeline<S, E> {
    /// Create a new pipeline over a glossary snapshot.
    pub fn new(glossary: Arc<Glossary>, store: S, extractor: E) -> Self {
        Self {
            glossary,
            store,
            extractor,
        }
    }

    /// The glossary snapshot this pipeline resolves against.
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying extractor.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Extract and resolve entities from already-loaded content.
    ///
    /// Runs the extractor, then classifies every returned mention and
    /// persists a link or pending entry per mention. Malformed extractor
    /// output degrades to an empty mention list with `degraded` set on
    /// the result; extractor transport failures propagate as errors.
    pub async fn extract_from_source(
        &self,
        source_id: &str,
        content: &str,
        is_voice: bool,
    ) -> Result<ExtractionResult> {
        let output = self
            .extractor
            .extract(content, &self.glossary, is_voice)
            .await?;

        let degraded = output.is_malformed();
        if degraded {
            warn!(source_id = %source_id, "extractor output malformed, degrading to zero mentions");
        }

        let mentions = output.into_mentions();
        let mut result = resolve_mentions(source_id, mentions, &self.glossary, &self.store).await?;
        result.degraded = degraded;
        Ok(result)
    }

    /// Load a source via the loader, extract, resolve, and mark the
    /// source processed on success.
    pub async fn process_source<L: SourceLoader>(
        &self,
        source_id: &str,
        loader: &L,
    ) -> Result<ExtractionResult> {
        let text = loader.load(source_id).await?;
        let result = self
            .extract_from_source(source_id, &text.content, text.is_voice)
            .await?;

        self.store.mark_processed(source_id).await?;
        Ok(result)
    }

    /// Process a source with cancellation support.
    ///
    /// On cancellation, records already written for classified mentions
    /// remain valid; nothing is rolled back. Re-processing the same
    /// source later is safe when the store deduplicates pending entries.
    pub async fn process_source_with_cancel<L: SourceLoader>(
        &self,
        source_id: &str,
        loader: &L,
        cancel: CancellationToken,
    ) -> Result<ExtractionResult> {
        tokio::select! {
            // Checked first so an already-cancelled token wins
            biased;
            _ = cancel.cancelled() => Err(ResolutionError::Cancelled),
            result = self.process_source(source_id, loader) => result,
        }
    }

    /// Process many sources, isolating failures per source.
    ///
    /// One failing source never aborts the batch: its error is reported
    /// in that source's outcome and the run continues.
    pub async fn process_batch<L: SourceLoader>(
        &self,
        source_ids: &[String],
        loader: &L,
    ) -> Vec<SourceOutcome> {
        let mut outcomes = Vec::with_capacity(source_ids.len());

        for source_id in source_ids {
            let result = self.process_source(source_id, loader).await;
            if let Err(err) = &result {
                warn!(source_id = %source_id, error = %err, "source failed, continuing batch");
            }
            outcomes.push(SourceOutcome {
                source_id: source_id.clone(),
                result,
            });
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            total = outcomes.len(),
            failed, "batch extraction finished"
        );

        outcomes
    }
}
