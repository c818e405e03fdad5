//! Ranked category breakdowns
//!
//! Counting, percentages and ranking. Every function here builds new values;
//! nothing is updated in place once returned.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::aggregation::top_n::TopN;
use crate::models::Provenance;

/// Percentage of `count` in `total`, rounded half up
///
/// Integer arithmetic, so `1/8` is exactly `13`. Returns 0 when `total` is 0
/// and never exceeds 100.
#[must_use]
pub fn percentage(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let count = u128::from(count);
    let total = u128::from(total);
    let rounded = (200 * count + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Counts per category in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(String, u64)>,
    index: FxHashMap<String, usize>,
}

impl CategoryCounts {
    /// Empty counts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count each value once
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values.into_iter().fold(Self::new(), |counts, value| counts.with(value.as_ref(), 1))
    }

    /// Counts with `amount` added to `key`
    #[must_use]
    pub fn with(mut self, key: &str, amount: u64) -> Self {
        self.add(key, amount);
        self
    }

    /// Add `amount` to `key`, registering the key if new
    ///
    /// An `amount` of zero still registers the key.
    pub fn add(&mut self, key: &str, amount: u64) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    /// Count for a key, if registered
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    /// Whether a key is registered
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Number of registered keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Count, percentage, rank and provenance for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    /// Category value
    pub id: String,
    /// Raw count
    pub count: u64,
    /// Percentage of the full filtered population (0-100)
    pub percentage: u8,
    /// 1-based rank by descending count
    pub rank: usize,
    /// Where the count came from
    pub provenance: Provenance,
}

/// Ranked results for one category over one filtered population
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    /// Percentage denominator: the full filtered population
    pub total: u64,
    /// Results
    pub results: Vec<AggregationResult>,
}

impl Breakdown {
    /// Rank entries by descending count
    ///
    /// The sort is stable, so ties keep their input order.
    #[must_use]
    pub fn ranked<I>(entries: I, total: u64) -> Self
    where
        I: IntoIterator<Item = (String, u64, Provenance)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let results = entries
            .into_iter()
            .enumerate()
            .map(|(position, (id, count, provenance))| AggregationResult {
                percentage: percentage(count, total),
                rank: position + 1,
                id,
                count,
                provenance,
            })
            .collect();

        Self { total, results }
    }

    /// Rank entries but keep them in the given order
    ///
    /// Used where consumers expect a fixed layout, such as Yes/No pairs.
    #[must_use]
    pub fn in_fixed_order<I>(entries: I, total: u64) -> Self
    where
        I: IntoIterator<Item = (String, u64, Provenance)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        let mut by_count: Vec<usize> = (0..entries.len()).collect();
        by_count.sort_by(|&a, &b| entries[b].1.cmp(&entries[a].1));

        let mut ranks = vec![0; entries.len()];
        for (position, &entry) in by_count.iter().enumerate() {
            ranks[entry] = position + 1;
        }

        let results = entries
            .into_iter()
            .zip(ranks)
            .map(|((id, count, provenance), rank)| AggregationResult {
                percentage: percentage(count, total),
                rank,
                id,
                count,
                provenance,
            })
            .collect();

        Self { total, results }
    }

    /// Rank category counts that all share one provenance
    #[must_use]
    pub fn from_counts(counts: &CategoryCounts, total: u64, provenance: Provenance) -> Self {
        Self::ranked(
            counts
                .iter()
                .map(|(id, count)| (id.to_string(), count, provenance)),
            total,
        )
    }

    /// Result for a category value
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AggregationResult> {
        self.results.iter().find(|result| result.id == id)
    }

    /// Keep the first `n` ranked results for presentation
    #[must_use]
    pub fn top(&self, n: usize) -> TopN {
        TopN::from_breakdown(self, n)
    }

    /// Sum of all percentages
    #[must_use]
    pub fn percentage_sum(&self) -> u32 {
        self.results.iter().map(|r| u32::from(r.percentage)).sum()
    }

    /// Number of results
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether there are no results
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
