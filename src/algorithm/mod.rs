//! Aggregation algorithms over a filtered population
//!
//! This module contains the categorical aggregator, the dual-source
//! reconciler, the geographic estimator and the population report that
//! runs them together for one search.

pub mod aggregation;
pub mod geography;
pub mod population;
pub mod reconcile;
