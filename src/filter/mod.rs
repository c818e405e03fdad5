//! Filtering capabilities for the patient population
//!
//! This module provides the filter configuration (five criteria groups and
//! their link operators) and the resolver that applies it to a population.

pub mod criteria;
pub mod resolver;

pub use criteria::{
    CriteriaGroup, CriteriaGroupSpec, FilterConfiguration, FilterConfigurationBuilder,
    FilterConfigurationSpec, FilterCriteria, GROUP_COUNT, LinkOperator, OPERATOR_COUNT,
};
pub use resolver::{
    FilteredPopulation, GroupMatch, PatientCriteriaIndex, PatientCriteriaValues, resolve,
    resolve_snapshot,
};
