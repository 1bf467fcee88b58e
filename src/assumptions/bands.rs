//! Threshold band tables used by every numeric scoring factor
//!
//! A table is an ordered list of `(bound, points)` pairs plus a fallback.
//! Lookup walks the list in order and returns the points of the first band
//! whose bound matches; if none matches the fallback applies.

use serde::{Deserialize, Serialize};

/// How a band's bound is compared against the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandDirection {
    /// Value must be >= bound (higher is better, bounds descending)
    AtLeast,
    /// Value must be < bound (lower is better, bounds ascending)
    Below,
}

/// A single threshold band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub bound: f64,
    pub points: i32,
}

impl Band {
    pub const fn new(bound: f64, points: i32) -> Self {
        Self { bound, points }
    }
}

/// Ordered band table with a fallback for values matching no band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub direction: BandDirection,
    pub bands: Vec<Band>,
    pub fallback: i32,
}

impl BandTable {
    /// Bands for "higher is better" factors; list bounds from highest to lowest
    pub fn at_least(bands: Vec<Band>, fallback: i32) -> Self {
        Self {
            direction: BandDirection::AtLeast,
            bands,
            fallback,
        }
    }

    /// Bands for "lower is better" factors; list bounds from lowest to highest
    pub fn below(bands: Vec<Band>, fallback: i32) -> Self {
        Self {
            direction: BandDirection::Below,
            bands,
            fallback,
        }
    }

    /// Points for `value`. NaN never matches a band and gets the fallback.
    pub fn lookup(&self, value: f64) -> i32 {
        self.bands
            .iter()
            .find(|band| match self.direction {
                BandDirection::AtLeast => value >= band.bound,
                BandDirection::Below => value < band.bound,
            })
            .map(|band| band.points)
            .unwrap_or(self.fallback)
    }

    /// Points of the worst band (the fallback)
    pub fn worst(&self) -> i32 {
        self.fallback
    }

    /// Highest points this table can award
    pub fn max_points(&self) -> i32 {
        self.bands
            .iter()
            .map(|band| band.points)
            .chain(std::iter::once(self.fallback))
            .max()
            .unwrap_or(self.fallback)
    }

    /// Check that bounds are strictly ordered for the direction and that
    /// points never improve as the value gets worse
    pub fn check_monotonic(&self) -> Result<(), String> {
        for pair in self.bands.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            let ordered = match self.direction {
                BandDirection::AtLeast => first.bound > second.bound,
                BandDirection::Below => first.bound < second.bound,
            };
            if !ordered || !first.bound.is_finite() || !second.bound.is_finite() {
                return Err(format!(
                    "band bounds {} and {} are out of order",
                    first.bound, second.bound
                ));
            }
            if second.points > first.points {
                return Err(format!(
                    "band at {} awards more points than the band at {}",
                    second.bound, first.bound
                ));
            }
        }
        if let Some(last) = self.bands.last() {
            if self.fallback > last.points {
                return Err("fallback awards more points than the last band".to_string());
            }
        }
        Ok(())
    }
}
