//! Discrete colour-intensity buckets
//!
//! The engine only assigns bucket indices. Mapping an index to a colour is
//! left to the presentation layer.

use serde::Serialize;

/// Linear bucket scale from zero to the largest regional value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketScale {
    levels: u8,
    max: u64,
}

impl BucketScale {
    /// Scale with `levels` indices (`0..levels`) over values up to `max`
    #[must_use]
    pub fn new(levels: u8, max: u64) -> Self {
        Self {
            levels: levels.max(1),
            max,
        }
    }

    /// Scale fitted to the largest of `values`
    #[must_use]
    pub fn fitted(levels: u8, values: impl IntoIterator<Item = u64>) -> Self {
        Self::new(levels, values.into_iter().max().unwrap_or(0))
    }

    /// Number of levels
    #[must_use]
    pub const fn levels(&self) -> u8 {
        self.levels
    }

    /// Largest value on the scale
    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    /// Bucket index for a value
    ///
    /// Zero maps to index 0, the maximum to the top index, and every other
    /// nonzero value to `ceil(value * (levels - 1) / max)`, so nonzero
    /// values never share the zero bucket.
    #[must_use]
    pub fn bucket_for(&self, value: u64) -> u8 {
        if value == 0 || self.max == 0 || self.levels < 2 {
            return 0;
        }
        let top = u128::from(self.levels - 1);
        let value = u128::from(value.min(self.max));
        let max = u128::from(self.max);
        let index = (value * top).div_ceil(max);
        u8::try_from(index.min(top)).unwrap_or(self.levels - 1)
    }
}
