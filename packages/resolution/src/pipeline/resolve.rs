//! The resolution engine: classify raw mentions and drive store writes.
//!
//! Classification is a pure per-mention decision with no cross-mention
//! state, so the outcome is independent of processing order and needs no
//! I/O to unit-test. The write loop around it is the only part that
//! touches the store.

use tracing::{debug, info, warn};

use crate::error::{ResolutionError, Result};
use crate::glossary::Glossary;
use crate::traits::store::EntityStore;
use crate::types::{mention::RawMention, result::ExtractionResult};

/// Outcome of classifying one raw mention.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The mention (or its suggestion) resolved to a glossary entity.
    Matched {
        /// Canonical id of the resolved entity
        entity_id: String,
    },

    /// No glossary match; queue for review.
    Pending {
        /// The extractor's unresolved canonical guess, if any
        suggested_entity: Option<String>,
    },
}

/// Classify one mention against the glossary.
///
/// The cascade, in priority order:
///
/// 1. The mention text itself resolves -> matched with that entity.
/// 2. The mention carries a suggested canonical form and *that* resolves
///    -> matched with the suggestion's entity. The entity identity comes
///    from whichever string resolved, but the stored mention text and
///    confidence always come from the raw mention.
/// 3. The suggestion exists but does not resolve -> pending, carrying
///    the unresolved suggestion for the reviewer.
/// 4. No suggestion at all -> pending with no suggestion.
///
/// Steps 3 and 4 are why the review queue exists: the glossary stays
/// authoritative and human-curated instead of auto-expanding.
///
/// Pure and total: never fails, never touches I/O.
pub fn classify(mention: &RawMention, glossary: &Glossary) -> Classification {
    if let Some(entity_id) = glossary.resolve(&mention.mention) {
        return Classification::Matched {
            entity_id: entity_id.to_string(),
        };
    }

    match mention.suggested_canonical.as_deref() {
        Some(suggested) => match glossary.resolve(suggested) {
            Some(entity_id) => Classification::Matched {
                entity_id: entity_id.to_string(),
            },
            None => Classification::Pending {
                suggested_entity: Some(suggested.to_string()),
            },
        },
        None => Classification::Pending {
            suggested_entity: None,
        },
    }
}

/// Classify each mention and persist the outcome.
///
/// Every mention yields exactly one store write: a source-entity link
/// when matched, a pending entry otherwise. Writes are best-effort: a
/// failed write for one mention does not stop the rest, but failures are
/// collected and surfaced as a `StoreWrite` error after the pass. The
/// engine never retries; retries are the caller's call.
///
/// On success the returned counts satisfy
/// `matched + pending == entities_found`.
pub async fn resolve_mentions<S>(
    source_id: &str,
    mentions: Vec<RawMention>,
    glossary: &Glossary,
    store: &S,
) -> Result<ExtractionResult>
where
    S: EntityStore + ?Sized,
{
    let mut matched = 0;
    let mut pending = 0;
    let mut failed = 0;

    for mention in &mentions {
        let confidence = mention.score();

        let write = match classify(mention, glossary) {
            Classification::Matched { entity_id } => {
                debug!(
                    source_id = %source_id,
                    mention = %mention.mention,
                    entity_id = %entity_id,
                    "mention matched"
                );
                matched += 1;
                store
                    .add_source_entity(source_id, &entity_id, &mention.mention, confidence)
                    .await
            }
            Classification::Pending { suggested_entity } => {
                debug!(
                    source_id = %source_id,
                    mention = %mention.mention,
                    suggested = ?suggested_entity,
                    "mention pending review"
                );
                pending += 1;
                store
                    .queue_pending_entity(
                        &mention.mention,
                        source_id,
                        suggested_entity.as_deref(),
                        confidence,
                    )
                    .await
            }
        };

        if let Err(err) = write {
            warn!(
                source_id = %source_id,
                mention = %mention.mention,
                error = %err,
                "store write failed, continuing with remaining mentions"
            );
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(ResolutionError::StoreWrite {
            source_id: source_id.to_string(),
            failed,
            attempted: mentions.len(),
        });
    }

    info!(
        source_id = %source_id,
        entities_found = mentions.len(),
        matched,
        pending,
        "resolved mentions"
    );

    Ok(ExtractionResult {
        source_id: source_id.to_string(),
        entities_found: mentions.len(),
        matched,
        pending,
        degraded: false,
        entities: mentions,
    })
}
