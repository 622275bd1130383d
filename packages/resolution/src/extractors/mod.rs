//! Extractor implementations.

pub mod anthropic;

pub use anthropic::{parse_extractor_response, AnthropicExtractor, DEFAULT_MODEL};
