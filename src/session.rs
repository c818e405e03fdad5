//! Search sessions
//!
//! A session hands out a ticket per search. A finished report is only
//! accepted when its ticket is the latest one issued and it was computed
//! against the current snapshot; anything else is stale and discarded.
//! There is no cancellation, a stale search simply runs to completion.

use log::debug;

use crate::algorithm::population::PopulationReport;
use crate::config::EngineConfig;
use crate::filter::FilterConfiguration;
use crate::models::RecordSnapshot;

/// Identifies one search within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket {
    sequence: u64,
    generation: u64,
}

impl SearchTicket {
    /// Position of the search in issue order
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Snapshot generation the search was issued against
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the latest search and the current snapshot
#[derive(Debug, Clone)]
pub struct SearchSession {
    latest: u64,
    generation: u64,
}

impl SearchSession {
    /// Start a session over a snapshot
    #[must_use]
    pub const fn new(snapshot: &RecordSnapshot) -> Self {
        Self {
            latest: 0,
            generation: snapshot.generation(),
        }
    }

    /// Issue a ticket for a new search, superseding all earlier ones
    pub fn begin(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket {
            sequence: self.latest,
            generation: self.generation,
        }
    }

    /// Switch to a reloaded snapshot; outstanding tickets become stale
    pub fn replace_snapshot(&mut self, snapshot: &RecordSnapshot) {
        debug!(
            "Search session moved from generation {} to {}",
            self.generation,
            snapshot.generation()
        );
        self.generation = snapshot.generation();
    }

    /// Whether a ticket is still the latest search on the current snapshot
    #[must_use]
    pub const fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.sequence == self.latest && ticket.generation == self.generation
    }

    /// Accept a finished report, or drop it when stale
    #[must_use]
    pub fn accept(&self, ticket: SearchTicket, report: PopulationReport) -> Option<PopulationReport> {
        if self.is_current(ticket) && report.generation == self.generation {
            Some(report)
        } else {
            debug!(
                "Discarding stale report for search {} (generation {})",
                ticket.sequence, report.generation
            );
            None
        }
    }

    /// Run a search to completion and accept its report
    ///
    /// Fails to accept only when the snapshot is not the session's current
    /// one.
    #[must_use]
    pub fn run(
        &mut self,
        snapshot: &RecordSnapshot,
        filter: &FilterConfiguration,
        config: &EngineConfig,
        focus: Option<&str>,
    ) -> Option<PopulationReport> {
        let ticket = self.begin();
        let report = PopulationReport::build(snapshot, filter, config, focus);
        self.accept(ticket, report)
    }
}
