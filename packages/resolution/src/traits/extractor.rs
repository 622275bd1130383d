//! Extractor trait for LLM-backed entity extraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::glossary::Glossary;
use crate::types::mention::RawMention;

/// Output of one extraction call.
///
/// Malformed model output is an explicit outcome, not an error: the
/// extractor is conservative by design, and a missed entity is cheaper
/// than a hallucinated one. Callers that need to distinguish "nothing
/// found" from "could not understand the model" check for `Malformed`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorOutput {
    /// Raw mentions in the order the model produced them
    Mentions(Vec<RawMention>),

    /// The model replied, but the response was not valid structured
    /// output. Degrades to zero mentions.
    Malformed,
}

impl ExtractorOutput {
    /// The mention list; empty for malformed output.
    pub fn into_mentions(self) -> Vec<RawMention> {
        match self {
            Self::Mentions(mentions) => mentions,
            Self::Malformed => Vec::new(),
        }
    }

    /// Whether the model output was unparseable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

/// Extractor trait: given text and glossary context, return raw mentions.
///
/// Implementations wrap a specific LLM provider and own prompting and
/// response parsing. The contract:
///
/// - Malformed model output returns `Ok(ExtractorOutput::Malformed)`,
///   never an error.
/// - Missing credentials or transport failure returns
///   `Err(ExtractorUnavailable)`, the one hard-failure case.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract raw entity mentions from content.
    ///
    /// The glossary is passed for prompt context (a bounded sample of
    /// known entities); `is_voice` flags voice-transcribed content so
    /// the prompt can warn about transcription artifacts.
    async fn extract(
        &self,
        content: &str,
        glossary: &Glossary,
        is_voice: bool,
    ) -> Result<ExtractorOutput>;
}
