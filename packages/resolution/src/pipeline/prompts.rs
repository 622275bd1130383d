//! The entity extraction prompt and its formatting helpers.

use sha2::{Digest, Sha256};

use crate::glossary::Glossary;

/// Prompt for extracting named entities from a conversation or document.
pub const EXTRACTION_PROMPT: &str = r#"You are extracting named entities from a conversation or document.

<known_entities>
{glossary_sample}
</known_entities>

<content>
{content}
</content>

Extract entities in these categories:
- People: Named individuals (not roles like "the manager")
- Products: Named tools, systems, products
- Projects: Named initiatives, projects
- Organizations: Companies, teams, departments
- Concepts: Technical terms, methodologies (only if domain-specific)

For each entity, provide:
1. The exact mention text
2. Your confidence (high/medium/low)
3. Suggested canonical name (may match known entity)
4. Why you think this is an entity

{voice_note}

Output JSON:
{
  "entities": [
    {
      "mention": "GeoX",
      "confidence": "high",
      "suggested_canonical": "Region:Lift",
      "reasoning": "Appears to be alternative name for Region:Lift based on context"
    }
  ]
}

Be conservative. Better to miss an entity than hallucinate one."#;

/// Note appended for voice-transcribed content.
pub const VOICE_NOTE: &str = "Note: This is a voice-transcribed conversation. Expect transcription
errors (homophones, mishearings). Focus on entities that are clearly intentional
references despite any transcription artifacts.";

/// Default cap on content characters sent to the model.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 50_000;

/// How many glossary entities to include as prompt context.
pub const GLOSSARY_SAMPLE_SIZE: usize = 20;

/// Format a bounded sample of glossary entities for the prompt.
///
/// One line per entity: `- Name (Category): description [aliases: a, b]`.
pub fn format_glossary_sample(glossary: &Glossary, max_entities: usize) -> String {
    let lines: Vec<String> = glossary
        .entries()
        .take(max_entities)
        .map(|(category, name, details)| {
            let mut line = format!("- {} ({})", name, category);
            if let Some(description) = &details.description {
                line.push_str(&format!(": {}", description));
            }
            if !details.aliases.is_empty() {
                line.push_str(&format!(" [aliases: {}]", details.aliases.join(", ")));
            }
            line
        })
        .collect();

    if lines.is_empty() {
        return "(No known entities yet)".to_string();
    }

    lines.join("\n")
}

/// Truncate content to `max_chars` characters, appending a marker noting
/// how many characters were omitted. Cuts on a char boundary.
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    let total = content.chars().count();
    if total <= max_chars {
        return content.to_string();
    }

    let cut = content
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(content.len());

    format!(
        "{}\n\n[... truncated, {} chars omitted ...]",
        &content[..cut],
        total - max_chars
    )
}

/// Build the full extraction prompt.
pub fn build_extraction_prompt(
    content: &str,
    glossary: &Glossary,
    is_voice: bool,
    max_content_chars: usize,
) -> String {
    let sample = format_glossary_sample(glossary, GLOSSARY_SAMPLE_SIZE);
    let voice_note = if is_voice { VOICE_NOTE } else { "" };
    let truncated = truncate_content(content, max_content_chars);

    EXTRACTION_PROMPT
        .replace("{glossary_sample}", &sample)
        .replace("{content}", &truncated)
        .replace("{voice_note}", voice_note)
}

/// Stable hash of the extraction prompt template, for audit trails and
/// cache invalidation when the prompt changes.
pub fn extraction_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(EXTRACTION_PROMPT.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::EntityDetails;

    fn test_glossary() -> Glossary {
        Glossary::builder()
            .entity(
                "Region",
                "Region:Lift",
                EntityDetails::new()
                    .with_description("Regional measurement")
                    .with_aliases(["GeoX", "RL"]),
            )
            .entity("Project", "Project:Nova", EntityDetails::new())
            .build()
    }

    #[test]
    fn sample_formats_name_category_description_aliases() {
        let sample = format_glossary_sample(&test_glossary(), 20);
        assert!(sample.contains("- Region:Lift (Region): Regional measurement [aliases: GeoX, RL]"));
        assert!(sample.contains("- Project:Nova (Project)"));
    }

    #[test]
    fn sample_is_bounded() {
        let mut builder = Glossary::builder();
        for i in 0..30 {
            builder = builder.entity("Cat", format!("Entity{}", i), EntityDetails::new());
        }
        let sample = format_glossary_sample(&builder.build(), 20);
        assert_eq!(sample.lines().count(), 20);
    }

    #[test]
    fn empty_glossary_gets_placeholder() {
        let sample = format_glossary_sample(&Glossary::new(), 20);
        assert_eq!(sample, "(No known entities yet)");
    }

    #[test]
    fn short_content_is_not_truncated() {
        assert_eq!(truncate_content("hello", 100), "hello");
    }

    #[test]
    fn long_content_gets_truncation_marker() {
        let content = "x".repeat(120);
        let truncated = truncate_content(&content, 100);
        assert!(truncated.starts_with(&"x".repeat(100)));
        assert!(truncated.ends_with("[... truncated, 20 chars omitted ...]"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let content = "é".repeat(10);
        let truncated = truncate_content(&content, 5);
        assert!(truncated.contains("[... truncated, 5 chars omitted ...]"));
    }

    #[test]
    fn prompt_includes_sample_and_content() {
        let prompt = build_extraction_prompt("GeoX came up today", &test_glossary(), false, 1000);
        assert!(prompt.contains("GeoX came up today"));
        assert!(prompt.contains("- Region:Lift (Region)"));
        assert!(!prompt.contains("voice-transcribed"));
        assert!(!prompt.contains("{glossary_sample}"));
        assert!(!prompt.contains("{content}"));
        assert!(!prompt.contains("{voice_note}"));
    }

    #[test]
    fn voice_flag_adds_transcription_note() {
        let prompt = build_extraction_prompt("content", &test_glossary(), true, 1000);
        assert!(prompt.contains("voice-transcribed"));
    }

    #[test]
    fn prompt_hash_is_stable() {
        let h1 = extraction_prompt_hash();
        let h2 = extraction_prompt_hash();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64); // SHA-256 hex
    }
}
