//! Proportional "affected" estimates
//!
//! When only a population-wide count is known for a category, the affected
//! count in a region is estimated by applying the same rate to the region's
//! total. These are descriptive point estimates only.

use serde::Serialize;

/// Population-wide rate of a focus category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffectedRate {
    /// Patients affected across the filtered population
    pub affected: u64,
    /// Size of the filtered population
    pub population: u64,
}

impl AffectedRate {
    /// Create a rate; `affected` above `population` is treated as the whole
    /// population
    #[must_use]
    pub const fn new(affected: u64, population: u64) -> Self {
        Self {
            affected,
            population,
        }
    }

    /// Whether the rate is above zero
    #[must_use]
    pub const fn is_nonzero(&self) -> bool {
        self.affected > 0 && self.population > 0
    }

    /// Rate as a fraction in `[0, 1]`, for display
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        (self.affected.min(self.population) as f64) / (self.population as f64)
    }
}

/// Estimated affected patients in a region of `region_total` patients
///
/// Rounds half up in exact integer arithmetic. A region with patients gets
/// at least 1 whenever the rate is nonzero, so a small but affected region
/// is never drawn as unaffected. This floor biases small regions upwards.
#[must_use]
pub fn estimate_affected(region_total: u64, rate: AffectedRate) -> u64 {
    if !rate.is_nonzero() || region_total == 0 {
        return 0;
    }
    let affected = u128::from(rate.affected.min(rate.population));
    let population = u128::from(rate.population);
    let total = u128::from(region_total);

    let estimate = (2 * total * affected + population) / (2 * population);
    u64::try_from(estimate).unwrap_or(region_total).max(1)
}
