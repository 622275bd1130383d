//! Domain data types.

pub mod entity;
pub mod mention;
pub mod result;
pub mod source;

pub use entity::{PendingEntity, SourceEntity};
pub use mention::{confidence_score, RawMention};
pub use result::ExtractionResult;
pub use source::{SearchHit, SourceRecord, SourceStatus, StoreStats};
