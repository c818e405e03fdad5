//! Immutable record snapshot
//!
//! A search always runs against one snapshot. Reloading produces a new
//! snapshot with a new generation number; nothing mutates an existing one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::EngineConfig;
use crate::models::{InsightRecord, PatientRecord, RawRecord};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Loaded patients and insights, shared read-only
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    generation: u64,
    loaded_at: DateTime<Utc>,
    patients: Arc<[PatientRecord]>,
    insights: Arc<[InsightRecord]>,
}

impl RecordSnapshot {
    /// Create a snapshot from typed records
    #[must_use]
    pub fn new(patients: Vec<PatientRecord>, insights: Vec<InsightRecord>) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        debug!(
            "Created snapshot generation {generation} with {} patients and {} insights",
            patients.len(),
            insights.len()
        );
        Self {
            generation,
            loaded_at: Utc::now(),
            patients: patients.into(),
            insights: insights.into(),
        }
    }

    /// Create a snapshot from loosely typed records
    #[must_use]
    pub fn from_raw(patients: &[RawRecord], insights: &[RawRecord], config: &EngineConfig) -> Self {
        let patients = patients
            .iter()
            .enumerate()
            .map(|(row, raw)| {
                PatientRecord::from_raw(raw, &config.field_aliases, &config.hrsn_categories, row)
            })
            .collect();

        let insights: Vec<InsightRecord> = insights
            .iter()
            .flat_map(|raw| InsightRecord::from_raw(raw, &config.field_aliases))
            .collect();

        Self::new(patients, insights)
    }

    /// Generation number, unique per snapshot in this process
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// When the snapshot was created
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// All patients, in load order
    #[must_use]
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// All insights, in load order
    #[must_use]
    pub fn insights(&self) -> &[InsightRecord] {
        &self.insights
    }
}
