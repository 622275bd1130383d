//! Anthropic implementation of the Extractor trait.
//!
//! Calls the Messages API with the extraction prompt and parses the
//! model's JSON reply into raw mentions.
//!
//! # Example
//!
//! ```rust,ignore
//! use resolution::extractors::AnthropicExtractor;
//!
//! let extractor = AnthropicExtractor::from_env()?.with_model("claude-3-5-haiku-20241022");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ResolutionError, Result};
use crate::glossary::Glossary;
use crate::pipeline::prompts::{build_extraction_prompt, DEFAULT_MAX_CONTENT_CHARS};
use crate::security::credentials::ExtractorCredentials;
use crate::traits::extractor::{Extractor, ExtractorOutput};
use crate::types::mention::RawMention;

/// Default model for entity extraction (fast, cheap).
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Anthropic-backed extractor.
#[derive(Clone)]
pub struct AnthropicExtractor {
    client: Client,
    credentials: ExtractorCredentials,
    base_url: String,
    max_content_chars: usize,
}

impl AnthropicExtractor {
    /// Create a new extractor with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            credentials: ExtractorCredentials::new(api_key, DEFAULT_MODEL),
            base_url: "https://api.anthropic.com".to_string(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// A missing key is a hard failure: the pipeline never silently
    /// continues without an extractor.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            ResolutionError::ExtractorUnavailable("ANTHROPIC_API_KEY not set".into())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set the model (default: claude-3-5-haiku-20241022).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.credentials.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the content truncation limit in characters.
    pub fn with_max_content_chars(mut self, max: usize) -> Self {
        self.max_content_chars = max;
        self
    }

    /// The current model name.
    pub fn model(&self) -> &str {
        &self.credentials.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.credentials.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.credentials.api_key.expose())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ResolutionError::ExtractorUnavailable(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResolutionError::ExtractorUnavailable(
                format!("Anthropic API error {}: {}", status, body).into(),
            ));
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ResolutionError::ExtractorUnavailable(Box::new(e)))?;

        reply
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| ResolutionError::ExtractorUnavailable("empty response body".into()))
    }
}

#[async_trait]
impl Extractor for AnthropicExtractor {
    async fn extract(
        &self,
        content: &str,
        glossary: &Glossary,
        is_voice: bool,
    ) -> Result<ExtractorOutput> {
        let prompt = build_extraction_prompt(content, glossary, is_voice, self.max_content_chars);
        let reply = self.complete(&prompt).await?;

        let output = parse_extractor_response(&reply);
        if let ExtractorOutput::Mentions(mentions) = &output {
            debug!(count = mentions.len(), model = %self.credentials.model, "extracted mentions");
        }
        Ok(output)
    }
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct EntitiesEnvelope {
    #[serde(default)]
    entities: Vec<RawMention>,
}

/// Parse the model's reply into extractor output.
///
/// The model may wrap its JSON in preamble text, so this locates the
/// outermost `{...}` span before parsing. Any parse failure degrades to
/// `Malformed` rather than an error: a missed entity is cheaper than a
/// hallucinated one. Mentions with empty text are discarded.
pub fn parse_extractor_response(reply: &str) -> ExtractorOutput {
    let Some(start) = reply.find('{') else {
        return ExtractorOutput::Malformed;
    };
    let Some(end) = reply.rfind('}') else {
        return ExtractorOutput::Malformed;
    };
    if end < start {
        return ExtractorOutput::Malformed;
    }

    match serde_json::from_str::<EntitiesEnvelope>(&reply[start..=end]) {
        Ok(envelope) => ExtractorOutput::Mentions(
            envelope
                .entities
                .into_iter()
                .filter(|m| !m.mention.trim().is_empty())
                .collect(),
        ),
        Err(_) => ExtractorOutput::Malformed,
    }
}
