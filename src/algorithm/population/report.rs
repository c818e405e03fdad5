//! Population report
//!
//! Runs one search against a snapshot: resolve the filter, aggregate the
//! filtered population, reconcile HRSN counts and build geographic bins.

use std::fmt;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::algorithm::aggregation::{
    Breakdown, TopN, YesNoBreakdown, demographic_breakdown, insight_breakdown, percentage,
    yes_no_breakdown, zip_breakdown,
};
use crate::algorithm::geography::{AffectedRate, GeographicBin, GeographicEstimator};
use crate::algorithm::reconcile::{
    ReconciledCategory, extracted_hrsn_counts, reconcile, structured_hrsn_counts, to_breakdown,
};
use crate::config::EngineConfig;
use crate::filter::{
    FilterConfiguration, FilterConfigurationSpec, FilteredPopulation, GroupMatch, resolve_snapshot,
};
use crate::models::{Demographic, InsightKind, Provenance, RecordSnapshot};
use crate::normalize::normalize_label;

/// Breakdown of one demographic attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicSection {
    /// The attribute
    pub attribute: Demographic,
    /// Full ranked breakdown
    pub breakdown: Breakdown,
}

/// Top labels for one insight kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightSection {
    /// The kind
    pub kind: InsightKind,
    /// Truncated breakdown
    pub top: TopN,
}

/// Reconciled HRSN counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrsnSection {
    /// Per-category counts from both sources
    pub categories: Vec<ReconciledCategory>,
    /// Categories ranked by combined count
    pub breakdown: Breakdown,
}

/// The category driving geographic estimates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusSummary {
    /// Normalized HRSN category
    pub category: String,
    /// Population-wide affected rate
    pub rate: AffectedRate,
    /// Rate as a percentage of the filtered population
    pub percentage: u8,
    /// Where the affected count came from
    pub provenance: Provenance,
}

/// Headline counts for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulationSummary {
    /// Patients in the snapshot
    pub source_patients: usize,
    /// Patients kept by the filter
    pub filtered_patients: usize,
    /// Insights linked to kept patients
    pub filtered_insights: usize,
    /// Kept patients with a usable ZIP code
    pub located_patients: usize,
}

impl PopulationSummary {
    fn from_filtered(filtered: &FilteredPopulation<'_>) -> Self {
        Self {
            source_patients: filtered.source_size(),
            filtered_patients: filtered.len(),
            filtered_insights: filtered.insights().len(),
            located_patients: filtered
                .patients()
                .iter()
                .filter(|patient| patient.zip.is_some())
                .count(),
        }
    }
}

impl fmt::Display for PopulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Population Summary:")?;
        writeln!(f, "  Source Patients: {}", self.source_patients)?;
        writeln!(f, "  Filtered Patients: {}", self.filtered_patients)?;
        writeln!(f, "  Linked Insights: {}", self.filtered_insights)?;
        writeln!(f, "  Patients with ZIP: {}", self.located_patients)?;
        Ok(())
    }
}

/// Everything one search produces
#[derive(Debug, Clone, Serialize)]
pub struct PopulationReport {
    /// Snapshot the report was computed from
    pub generation: u64,
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// Filter that was applied
    pub filter: FilterConfigurationSpec,
    /// Headline counts
    pub summary: PopulationSummary,
    /// Per-group match counts for constrained groups
    pub group_matches: Vec<GroupMatch>,
    /// Demographic breakdowns
    pub demographics: Vec<DemographicSection>,
    /// Top labels per insight kind
    pub insights: Vec<InsightSection>,
    /// Reconciled HRSN counts
    pub hrsn: HrsnSection,
    /// Yes/No breakdown per requested HRSN category
    pub indicators: Vec<YesNoBreakdown>,
    /// Top ZIP codes
    pub zip_codes: TopN,
    /// Focus category, when one was requested
    pub focus: Option<FocusSummary>,
    /// One bin per ZIP code
    pub geography: Vec<GeographicBin>,
}

impl PopulationReport {
    /// Run a search against a snapshot
    #[must_use]
    pub fn build(
        snapshot: &RecordSnapshot,
        filter: &FilterConfiguration,
        config: &EngineConfig,
        focus: Option<&str>,
    ) -> Self {
        let filtered = resolve_snapshot(filter, snapshot);
        Self::from_filtered(snapshot.generation(), filter, &filtered, config, focus)
    }

    /// Aggregate an already resolved population
    #[must_use]
    pub fn from_filtered(
        generation: u64,
        filter: &FilterConfiguration,
        filtered: &FilteredPopulation<'_>,
        config: &EngineConfig,
        focus: Option<&str>,
    ) -> Self {
        let patients = filtered.patients();
        let insights = filtered.insights();
        let population = patients.len() as u64;

        let demographics = Demographic::ALL
            .iter()
            .map(|&attribute| DemographicSection {
                attribute,
                breakdown: demographic_breakdown(patients, attribute),
            })
            .collect();

        let insight_sections = InsightKind::ALL
            .iter()
            .map(|&kind| InsightSection {
                kind,
                top: insight_breakdown(patients, insights, kind).top(config.default_top_n),
            })
            .collect();

        let categories = reconcile(
            &config.hrsn_categories,
            &structured_hrsn_counts(patients, &config.hrsn_categories),
            &extracted_hrsn_counts(insights),
        );
        let hrsn = HrsnSection {
            breakdown: to_breakdown(&categories, population),
            categories,
        };

        let indicators = config
            .hrsn_categories
            .iter()
            .map(|category| yes_no_breakdown(patients, &normalize_label(category)))
            .collect();

        let focus = focus.map(|category| focus_summary(&hrsn.categories, category, population));
        let geography = GeographicEstimator::new(config.bucket_levels)
            .bins(patients, focus.as_ref().map(|summary| summary.rate));

        info!(
            "Built population report for generation {generation}: {} of {} patients, {} regions",
            filtered.len(),
            filtered.source_size(),
            geography.len()
        );

        Self {
            generation,
            generated_at: Utc::now(),
            filter: FilterConfigurationSpec::from(filter),
            summary: PopulationSummary::from_filtered(filtered),
            group_matches: filtered.group_matches().to_vec(),
            demographics,
            insights: insight_sections,
            hrsn,
            indicators,
            zip_codes: zip_breakdown(patients).top(config.high_cardinality_top_n),
            focus,
            geography,
        }
    }

    /// Demographic breakdown for an attribute
    #[must_use]
    pub fn demographic(&self, attribute: Demographic) -> Option<&Breakdown> {
        self.demographics
            .iter()
            .find(|section| section.attribute == attribute)
            .map(|section| &section.breakdown)
    }

    /// Top labels for an insight kind
    #[must_use]
    pub fn insight(&self, kind: InsightKind) -> Option<&TopN> {
        self.insights
            .iter()
            .find(|section| section.kind == kind)
            .map(|section| &section.top)
    }

    /// Yes/No breakdown for an HRSN category
    #[must_use]
    pub fn indicator(&self, category: &str) -> Option<&YesNoBreakdown> {
        self.indicators
            .iter()
            .find(|indicator| indicator.category == category)
    }
}

fn focus_summary(categories: &[ReconciledCategory], category: &str, population: u64) -> FocusSummary {
    let category = normalize_label(category);
    let (affected, provenance) = categories
        .iter()
        .find(|reconciled| reconciled.id == category)
        .map_or_else(
            || {
                warn!("Focus category '{category}' has no HRSN records; using a zero rate");
                (0, Provenance::NoData)
            },
            |reconciled| (reconciled.combined, reconciled.provenance),
        );
    let rate = AffectedRate::new(affected, population);

    FocusSummary {
        percentage: percentage(affected, population),
        category,
        rate,
        provenance,
    }
}
