//! A Rust library for filtering and aggregating population-health patient
//! and symptom-insight records into chart-ready and map-ready statistics.

pub mod algorithm;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod session;
pub mod synthetic;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::EngineConfig;
pub use error::{InsightError, Result};
pub use models::{
    Demographic, HrsnAnswer, InsightKind, InsightRecord, PatientRecord, Provenance, RawRecord,
    RecordSnapshot,
};
pub use normalize::{ZipCode, normalize_label, normalize_zip};

// Filtering capabilities
pub use filter::{
    CriteriaGroup, FilterConfiguration, FilterConfigurationSpec, FilteredPopulation, LinkOperator,
    resolve, resolve_snapshot,
};

// Aggregation
pub use algorithm::aggregation::{AggregationResult, Breakdown, TopN};
pub use algorithm::geography::{AffectedRate, GeographicBin, GeographicEstimator};
pub use algorithm::population::PopulationReport;
pub use algorithm::reconcile::{ReconciledCategory, reconcile};

// Loading and sessions
pub use loader::{load_snapshot, load_snapshot_async};
pub use session::{SearchSession, SearchTicket};
pub use synthetic::SyntheticPopulation;
