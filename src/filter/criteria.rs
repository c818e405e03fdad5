//! Filter configuration
//!
//! Five criteria groups in a fixed order joined by four link operators.
//! The loose wire shape (`FilterConfigurationSpec`) is validated into a
//! `FilterConfiguration` whose shape is fixed by its types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};
use crate::models::InsightKind;
use crate::normalize::normalize_label_opt;

/// Number of criteria groups in a filter configuration
pub const GROUP_COUNT: usize = InsightKind::ALL.len();

/// Number of link operators in a filter configuration
pub const OPERATOR_COUNT: usize = GROUP_COUNT - 1;

/// Defines a criterion for filtering entities
pub trait FilterCriteria<T: ?Sized> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// Boolean operator joining two adjacent criteria groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkOperator {
    /// Both sides must hold
    #[serde(rename = "AND", alias = "and", alias = "And")]
    And,
    /// Either side may hold
    #[serde(rename = "OR", alias = "or", alias = "Or")]
    Or,
}

impl LinkOperator {
    /// Combine the running result with the next group, evaluating it only
    /// when needed
    pub fn combine(self, running: bool, next: impl FnOnce() -> bool) -> bool {
        match self {
            Self::And => running && next(),
            Self::Or => running || next(),
        }
    }
}

/// Selected values for one criteria group
///
/// An empty selection places no constraint on the population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaGroup {
    kind: InsightKind,
    values: BTreeSet<String>,
}

impl CriteriaGroup {
    /// Create a group; values are normalized and blanks dropped
    #[must_use]
    pub fn new<I, S>(kind: InsightKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kind,
            values: values
                .into_iter()
                .filter_map(|v| normalize_label_opt(v.as_ref()))
                .collect(),
        }
    }

    /// A group with no selection
    #[must_use]
    pub const fn empty(kind: InsightKind) -> Self {
        Self {
            kind,
            values: BTreeSet::new(),
        }
    }

    /// The group's kind
    #[must_use]
    pub const fn kind(&self) -> InsightKind {
        self.kind
    }

    /// Selected values
    #[must_use]
    pub const fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    /// Whether the group places no constraint
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any candidate is selected; vacuously true for an empty group
    pub fn matches_any<'v>(&self, candidates: impl IntoIterator<Item = &'v str>) -> bool {
        self.is_empty()
            || candidates
                .into_iter()
                .any(|candidate| self.values.contains(candidate))
    }
}

/// Validated filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterConfiguration {
    groups: [CriteriaGroup; GROUP_COUNT],
    operators: [LinkOperator; OPERATOR_COUNT],
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        Self::unconstrained()
    }
}

impl FilterConfiguration {
    /// Configuration with every group empty; matches the whole population
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            groups: InsightKind::ALL.map(CriteriaGroup::empty),
            operators: [LinkOperator::And; OPERATOR_COUNT],
        }
    }

    /// Start building a configuration
    #[must_use]
    pub fn builder() -> FilterConfigurationBuilder {
        FilterConfigurationBuilder::new()
    }

    /// Parse and validate a JSON filter configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: FilterConfigurationSpec = serde_json::from_str(json)?;
        Self::try_from(spec)
    }

    /// Criteria groups in fixed order
    #[must_use]
    pub const fn groups(&self) -> &[CriteriaGroup; GROUP_COUNT] {
        &self.groups
    }

    /// Link operators; `operators()[i]` joins group `i` and group `i + 1`
    #[must_use]
    pub const fn operators(&self) -> &[LinkOperator; OPERATOR_COUNT] {
        &self.operators
    }

    /// Group for a kind
    #[must_use]
    pub const fn group(&self, kind: InsightKind) -> &CriteriaGroup {
        &self.groups[kind.index()]
    }

    /// Whether every group is empty
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.groups.iter().all(CriteriaGroup::is_empty)
    }

    /// Fold the per-group results left to right over the running result
    ///
    /// `((((g1 OP1 g2) OP2 g3) OP3 g4) OP4 g5)`, with short-circuiting: a
    /// group is only evaluated when its value can change the result.
    pub fn evaluate(&self, mut group_matches: impl FnMut(&CriteriaGroup) -> bool) -> bool {
        let mut running = group_matches(&self.groups[0]);
        for (operator, group) in self.operators.iter().zip(&self.groups[1..]) {
            running = operator.combine(running, || group_matches(group));
        }
        running
    }
}

/// Builder for filter configurations
#[derive(Debug, Clone, Default)]
pub struct FilterConfigurationBuilder {
    config: FilterConfiguration,
}

impl FilterConfigurationBuilder {
    /// Create a builder with every group empty and every operator `AND`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select values for a group, replacing any previous selection
    #[must_use]
    pub fn select<I, S>(mut self, kind: InsightKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.groups[kind.index()] = CriteriaGroup::new(kind, values);
        self
    }

    /// Set all four link operators
    #[must_use]
    pub fn operators(mut self, operators: [LinkOperator; OPERATOR_COUNT]) -> Self {
        self.config.operators = operators;
        self
    }

    /// Use the same operator for every link
    #[must_use]
    pub fn all_operators(self, operator: LinkOperator) -> Self {
        self.operators([operator; OPERATOR_COUNT])
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> FilterConfiguration {
        self.config
    }
}

/// One criteria group as supplied by the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaGroupSpec {
    /// Which group this is
    pub kind: InsightKind,
    /// Selected values
    #[serde(default)]
    pub values: Vec<String>,
}

/// Filter configuration as supplied by the UI layer, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfigurationSpec {
    /// Criteria groups, expected in fixed order
    pub groups: Vec<CriteriaGroupSpec>,
    /// Link operators, one per adjacent pair of groups
    #[serde(default)]
    pub operators: Vec<LinkOperator>,
}

impl TryFrom<FilterConfigurationSpec> for FilterConfiguration {
    type Error = InsightError;

    fn try_from(spec: FilterConfigurationSpec) -> Result<Self> {
        if spec.groups.len() != GROUP_COUNT {
            return Err(InsightError::invalid_filter(format!(
                "expected {GROUP_COUNT} criteria groups, got {}",
                spec.groups.len()
            )));
        }
        if spec.operators.len() != spec.groups.len() - 1 {
            return Err(InsightError::invalid_filter(format!(
                "expected {OPERATOR_COUNT} link operators, got {}",
                spec.operators.len()
            )));
        }

        let mut builder = FilterConfigurationBuilder::new();
        for (position, (group, expected)) in spec.groups.into_iter().zip(InsightKind::ALL).enumerate() {
            if group.kind != expected {
                return Err(InsightError::invalid_filter(format!(
                    "criteria group {} must be {expected}, got {}",
                    position + 1,
                    group.kind
                )));
            }
            builder = builder.select(group.kind, group.values);
        }

        let mut operators = [LinkOperator::And; OPERATOR_COUNT];
        operators.copy_from_slice(&spec.operators);
        Ok(builder.operators(operators).build())
    }
}

impl From<&FilterConfiguration> for FilterConfigurationSpec {
    fn from(config: &FilterConfiguration) -> Self {
        Self {
            groups: config
                .groups
                .iter()
                .map(|group| CriteriaGroupSpec {
                    kind: group.kind,
                    values: group.values.iter().cloned().collect(),
                })
                .collect(),
            operators: config.operators.to_vec(),
        }
    }
}
