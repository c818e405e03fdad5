//! Configuration for the insight engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::FieldAliases;

/// Default number of entries kept for presentation
pub const DEFAULT_TOP_N: usize = 5;

/// Number of entries kept for high-cardinality categories such as ZIP code
pub const HIGH_CARDINALITY_TOP_N: usize = 25;

/// Default number of colour-intensity levels for geographic bins
pub const DEFAULT_BUCKET_LEVELS: u8 = 5;

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// HRSN categories requested when none are configured
pub const DEFAULT_HRSN_CATEGORIES: &[&str] = &[
    "housing_insecurity",
    "food_insecurity",
    "transportation_insecurity",
    "utility_insecurity",
    "interpersonal_safety",
];

/// Configuration for the engine and its loaders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries kept in regular top-N breakdowns
    pub default_top_n: usize,
    /// Entries kept in high-cardinality breakdowns (ZIP code)
    pub high_cardinality_top_n: usize,
    /// Number of ordered intensity levels for geographic bins
    pub bucket_levels: u8,
    /// HRSN categories that are always reported, even with no data
    pub hrsn_categories: Vec<String>,
    /// Alias table for reading loosely typed records
    pub field_aliases: FieldAliases,
    /// Batch size for Parquet reading
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
            high_cardinality_top_n: HIGH_CARDINALITY_TOP_N,
            bucket_levels: DEFAULT_BUCKET_LEVELS,
            hrsn_categories: DEFAULT_HRSN_CATEGORIES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            field_aliases: FieldAliases::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl EngineConfig {
    /// Default configuration with environment overrides applied
    ///
    /// Reads `INSIGHT_TOP_N`, `INSIGHT_ZIP_TOP_N`, `INSIGHT_BUCKET_LEVELS`
    /// and `INSIGHT_BATCH_SIZE`. Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());

        if let Some(n) = parse("INSIGHT_TOP_N").filter(|n| *n > 0) {
            self.default_top_n = n;
        }
        if let Some(n) = parse("INSIGHT_ZIP_TOP_N").filter(|n| *n > 0) {
            self.high_cardinality_top_n = n;
        }
        if let Some(levels) = parse("INSIGHT_BUCKET_LEVELS")
            .filter(|n| *n >= 2)
            .and_then(|n| u8::try_from(n).ok())
        {
            self.bucket_levels = levels;
        }
        if let Some(size) = parse("INSIGHT_BATCH_SIZE").filter(|n| *n > 0) {
            self.batch_size = size;
        }
        self
    }

    /// Replace the requested HRSN categories
    #[must_use]
    pub fn with_hrsn_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hrsn_categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(f, "  Top N: {}", self.default_top_n)?;
        writeln!(f, "  High-Cardinality Top N: {}", self.high_cardinality_top_n)?;
        writeln!(f, "  Bucket Levels: {}", self.bucket_levels)?;
        writeln!(f, "  HRSN Categories: {}", self.hrsn_categories.join(", "))?;
        writeln!(f, "  Batch Size: {}", self.batch_size)?;
        Ok(())
    }
}
