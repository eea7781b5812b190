//! Pure computations over the loaded dataset: map ratios and country series.

pub mod ratio;
pub mod series;

use serde::{Deserialize, Serialize};

pub use ratio::{compute_ratios, CountryRatio};
pub use series::{compute_series, CountrySeries, SeriesError, SeriesPoint, SeriesQuery};

/// Inclusive year range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[i32; 2]", into = "[i32; 2]")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("year range start {start} is after end {end}")]
pub struct InvertedRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, InvertedRange> {
        if start > end {
            return Err(InvertedRange { start, end });
        }
        Ok(YearRange { start, end })
    }

    /// Range between two years given in either order.
    pub fn spanning(a: i32, b: i32) -> Self {
        YearRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl TryFrom<[i32; 2]> for YearRange {
    type Error = InvertedRange;

    fn try_from([start, end]: [i32; 2]) -> Result<Self, Self::Error> {
        YearRange::new(start, end)
    }
}

impl From<YearRange> for [i32; 2] {
    fn from(range: YearRange) -> Self {
        [range.start, range.end]
    }
}

/// Round half to even at `decimals` places, the way the dashboard figures
/// have always been rounded.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
