//! Top-N truncation for presentation
//!
//! Truncation happens after ranking. Each kept entry keeps its percentage of
//! the full filtered population; the share among shown entries is reported
//! separately as `share_of_shown`.

use serde::Serialize;

use crate::algorithm::aggregation::breakdown::{AggregationResult, Breakdown, percentage};

/// A kept entry in a truncated breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEntry {
    /// The ranked result, percentage against the full population
    #[serde(flatten)]
    pub result: AggregationResult,
    /// Percentage of the sum of shown counts
    pub share_of_shown: u8,
}

/// The first `limit` ranked results of a breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopN {
    /// Full filtered population (unchanged by truncation)
    pub total: u64,
    /// Requested number of entries
    pub limit: usize,
    /// Kept entries in rank order
    pub entries: Vec<TopEntry>,
    /// Number of categories cut off
    pub omitted_categories: usize,
    /// Summed count of categories cut off
    pub omitted_count: u64,
}

impl TopN {
    /// Truncate a ranked breakdown
    #[must_use]
    pub fn from_breakdown(breakdown: &Breakdown, limit: usize) -> Self {
        let (shown, omitted) = breakdown
            .results
            .split_at(limit.min(breakdown.results.len()));
        let shown_total: u64 = shown.iter().map(|r| r.count).sum();

        Self {
            total: breakdown.total,
            limit,
            entries: shown
                .iter()
                .map(|result| TopEntry {
                    share_of_shown: percentage(result.count, shown_total),
                    result: result.clone(),
                })
                .collect(),
            omitted_categories: omitted.len(),
            omitted_count: omitted.iter().map(|r| r.count).sum(),
        }
    }

    /// Sum of shown counts
    #[must_use]
    pub fn shown_count(&self) -> u64 {
        self.entries.iter().map(|e| e.result.count).sum()
    }
}
