//! Record models
//!
//! Typed patient and insight records built from loosely typed key/value
//! maps, and the immutable snapshot a search runs against.

pub mod insight;
pub mod patient;
pub mod snapshot;
pub mod types;

/// A loosely typed record as delivered by the data provider
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

pub use insight::InsightRecord;
pub use patient::PatientRecord;
pub use snapshot::RecordSnapshot;
pub use types::{Demographic, HrsnAnswer, InsightKind, Provenance};
