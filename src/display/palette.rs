//! Colour palette for bucket indices
//!
//! Geographic bins carry only a bucket index. The palette turns an index
//! into a colour by linear interpolation between a zero colour and a
//! maximum colour.

use std::fmt;

use serde::Serialize;

use crate::config::DEFAULT_BUCKET_LEVELS;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// Create a colour
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Linear palette over bucket indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    zero: Rgb,
    max: Rgb,
    levels: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Rgb::new(0xf7, 0xfb, 0xff), Rgb::new(0x08, 0x30, 0x6b), DEFAULT_BUCKET_LEVELS)
    }
}

impl Palette {
    /// Palette from `zero` (index 0) to `max` (index `levels - 1`)
    #[must_use]
    pub fn new(zero: Rgb, max: Rgb, levels: u8) -> Self {
        Self {
            zero,
            max,
            levels: levels.max(1),
        }
    }

    /// Same colours over a different number of levels
    #[must_use]
    pub fn with_levels(mut self, levels: u8) -> Self {
        self.levels = levels.max(1);
        self
    }

    /// Colour for a bucket index; indices past the top get the max colour
    #[must_use]
    pub fn color_for(&self, index: u8) -> Rgb {
        if self.levels < 2 {
            return self.zero;
        }
        let top = u32::from(self.levels - 1);
        let step = u32::from(index).min(top);
        let channel = |from: u8, to: u8| {
            let from = i64::from(from);
            let to = i64::from(to);
            let delta = (to - from) * i64::from(step);
            let top = i64::from(top);
            // Round half away from zero
            let offset = if delta >= 0 {
                (2 * delta + top) / (2 * top)
            } else {
                -((-2 * delta + top) / (2 * top))
            };
            u8::try_from(from + offset).unwrap_or(if to > from { u8::MAX } else { 0 })
        };
        Rgb::new(
            channel(self.zero.r, self.max.r),
            channel(self.zero.g, self.max.g),
            channel(self.zero.b, self.max.b),
        )
    }

    /// Colours for every index in order
    #[must_use]
    pub fn colors(&self) -> Vec<Rgb> {
        (0..self.levels).map(|index| self.color_for(index)).collect()
    }
}
