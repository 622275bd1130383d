//! Collaborator trait abstractions.
//!
//! The resolution engine performs no I/O itself. Everything that can
//! block or fail lives behind one of these seams: the extractor (LLM),
//! the entity store (persistence), and the source loader (adapters).

pub mod extractor;
pub mod loader;
pub mod store;

pub use extractor::{Extractor, ExtractorOutput};
pub use loader::{SourceLoader, SourceText};
pub use store::EntityStore;
