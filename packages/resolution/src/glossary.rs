//! The glossary: an immutable index of known entities.
//!
//! A glossary maps category names to canonical entities, each with an
//! optional description and an ordered list of aliases. Categories are a
//! display grouping only; canonical names are unique across the whole
//! glossary.
//!
//! The lookup index is built once at construction and is read-only after
//! that, so a `Glossary` can be shared (`Arc`) across any number of
//! concurrent resolution passes. Reloads happen by constructing a new
//! value between passes, never by mutating a live one.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Details for one canonical entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDetails {
    /// Short human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Alternative names that resolve to this entity
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl EntityDetails {
    /// Create empty details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add multiple aliases.
    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases.extend(aliases.into_iter().map(|a| a.into()));
        self
    }
}

/// Normalization applied to every name and alias, at index build time and
/// at query time. The two sides must agree or matches silently fail.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// An immutable glossary of known entities with a normalized lookup index.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    categories: IndexMap<String, IndexMap<String, EntityDetails>>,

    // Normalized canonical name -> canonical id
    names: HashMap<String, String>,

    // Normalized alias -> canonical id
    aliases: HashMap<String, String>,
}

impl Glossary {
    /// Create an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a glossary.
    pub fn builder() -> GlossaryBuilder {
        GlossaryBuilder::default()
    }

    /// Load from a JSON document: `{category: {name: {description, aliases}}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Build from a parsed JSON value.
    ///
    /// Malformed entries (non-object categories or entity details) are
    /// skipped with a warning, never an error. This tolerance is
    /// deliberate: a partially-valid glossary still resolves everything
    /// it can.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let mut builder = Self::builder();

        let Some(categories) = value.as_object() else {
            warn!("glossary root is not an object, loading empty glossary");
            return Self::new();
        };

        for (category, entities) in categories {
            let Some(entities) = entities.as_object() else {
                warn!(category = %category, "skipping non-object glossary category");
                continue;
            };

            for (name, details) in entities {
                let details: EntityDetails = match serde_json::from_value(details.clone()) {
                    Ok(d) => d,
                    Err(_) => {
                        warn!(category = %category, entity = %name, "skipping malformed glossary entry");
                        continue;
                    }
                };
                builder = builder.entity(category, name, details);
            }
        }

        builder.build()
    }

    /// Resolve a free-text mention to a canonical entity id.
    ///
    /// Matching is exact after normalization (trim + lowercase):
    /// canonical names first, then registered aliases. There is no fuzzy
    /// or partial matching; near-misses belong in the review queue, not
    /// silently attributed to the closest entity.
    ///
    /// Pure query; returns `None` on no match, never an error.
    pub fn resolve(&self, mention: &str) -> Option<&str> {
        let key = normalize(mention);
        self.names
            .get(&key)
            .or_else(|| self.aliases.get(&key))
            .map(String::as_str)
    }

    /// Number of canonical entities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the glossary has no entities.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate entities in category order: `(category, name, details)`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &EntityDetails)> {
        self.categories.iter().flat_map(|(category, entities)| {
            entities
                .iter()
                .map(move |(name, details)| (category.as_str(), name.as_str(), details))
        })
    }
}

/// Builder accumulating entities before the index is frozen.
#[derive(Debug, Default)]
pub struct GlossaryBuilder {
    categories: IndexMap<String, IndexMap<String, EntityDetails>>,
}

impl GlossaryBuilder {
    /// Add one canonical entity under a category.
    pub fn entity(
        mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        details: EntityDetails,
    ) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(name.into(), details);
        self
    }

    /// Freeze into an immutable glossary, building the lookup index.
    pub fn build(self) -> Glossary {
        let mut names = HashMap::new();
        let mut aliases = HashMap::new();

        for (category, entities) in &self.categories {
            for (name, details) in entities {
                let key = normalize(name);
                if let Some(existing) = names.insert(key, name.clone()) {
                    warn!(
                        entity = %name,
                        category = %category,
                        previous = %existing,
                        "duplicate canonical name in glossary, later entry wins"
                    );
                }

                for alias in &details.aliases {
                    let key = normalize(alias);
                    if let Some(existing) = aliases.get(&key) {
                        if existing != name {
                            warn!(
                                alias = %alias,
                                entity = %name,
                                previous = %existing,
                                "alias already registered to another entity, keeping first"
                            );
                            continue;
                        }
                    }
                    aliases.insert(key, name.clone());
                }
            }
        }

        Glossary {
            categories: self.categories,
            names,
            aliases,
        }
    }
}
