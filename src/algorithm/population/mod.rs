//! Population reports for a search
//!
//! This module bundles every statistic computed for one filtered
//! population.

pub mod report;

pub use report::{
    DemographicSection, FocusSummary, HrsnSection, InsightSection, PopulationReport,
    PopulationSummary,
};
