//! Entity Extraction & Glossary Resolution Library
//!
//! Extracts named entities from heterogeneous text sources (chat
//! transcripts, voice-transcribed conversations, documents), reconciles
//! them against a curated glossary of known entities, and routes
//! unmatched mentions into a review queue.
//!
//! # Design Philosophy
//!
//! **The glossary stays authoritative**
//!
//! - Exact normalized matching, no fuzzy string similarity
//! - A near-miss goes through the suggestion cascade and human review,
//!   never silent misattribution
//! - The extractor is conservative: a missed entity is cheaper than a
//!   hallucinated one
//! - Classification is pure and I/O-free; collaborators own all
//!   blocking work
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resolution::{Glossary, MemoryStore, Pipeline};
//! use resolution::extractors::AnthropicExtractor;
//!
//! let glossary = Arc::new(Glossary::from_json(&glossary_json)?);
//! let pipeline = Pipeline::new(glossary, MemoryStore::new(), AnthropicExtractor::from_env()?);
//!
//! let result = pipeline.process_source("claude_code:abc123", &loader).await?;
//! assert_eq!(result.matched + result.pending, result.entities_found);
//! ```
//!
//! # Modules
//!
//! - [`glossary`] - Immutable entity glossary with normalized lookup
//! - [`traits`] - Collaborator abstractions (Extractor, EntityStore, SourceLoader)
//! - [`types`] - Domain data types
//! - [`pipeline`] - Resolution engine, orchestration, and prompts
//! - [`extractors`] - Anthropic-backed extractor implementation
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod extractors;
pub mod glossary;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ResolutionError, Result};
pub use glossary::{EntityDetails, Glossary, GlossaryBuilder};
pub use traits::{
    extractor::{Extractor, ExtractorOutput},
    loader::{SourceLoader, SourceText},
    store::EntityStore,
};
pub use types::{
    entity::{PendingEntity, SourceEntity},
    mention::{confidence_score, RawMention},
    result::ExtractionResult,
    source::{SearchHit, SourceRecord, SourceStatus, StoreStats},
};

// Re-export pipeline components
pub use pipeline::{
    build_extraction_prompt, classify, extraction_prompt_hash, format_glossary_sample,
    resolve_mentions, Classification, Pipeline, SourceOutcome,
};

// Re-export implementations
pub use extractors::AnthropicExtractor;
pub use stores::MemoryStore;

// Re-export testing utilities
pub use testing::{FailingStore, MockExtractor, MockLoader};
