//! The extraction pipeline.
//!
//! - [`resolve`] - the resolution engine (pure classification + write loop)
//! - [`extract`] - the `Pipeline` orchestrator over the collaborator traits
//! - [`prompts`] - the extraction prompt and its formatting helpers

pub mod extract;
pub mod prompts;
pub mod resolve;

pub use extract::{Pipeline, SourceOutcome};
pub use prompts::{
    build_extraction_prompt, extraction_prompt_hash, format_glossary_sample, truncate_content,
    DEFAULT_MAX_CONTENT_CHARS, EXTRACTION_PROMPT, GLOSSARY_SAMPLE_SIZE,
};
pub use resolve::{classify, resolve_mentions, Classification};
