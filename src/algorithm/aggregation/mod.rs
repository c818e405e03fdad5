//! Categorical aggregation
//!
//! Counts, percentages, ranks and top-N truncation over a filtered
//! population.

pub mod breakdown;
pub mod categorical;
pub mod top_n;

pub use breakdown::{AggregationResult, Breakdown, CategoryCounts, percentage};
pub use categorical::{
    YesNoBreakdown, demographic_breakdown, insight_breakdown, yes_no_breakdown, zip_breakdown,
};
pub use top_n::{TopEntry, TopN};
