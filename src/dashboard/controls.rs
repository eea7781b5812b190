//! Control surface: year slider bounds, sex and age radios.

use serde::Serialize;

use crate::dashboard::state::DashboardState;
use crate::data::record::{AgeBracket, Sex};
use crate::engine::YearRange;

pub const DEFAULT_START_YEAR: i32 = 2006;
pub const DEFAULT_END_YEAR: i32 = 2018;
pub const MIN_SPAN: i32 = 1;
const MARK_EVERY: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSlider {
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub min_span: i32,
    pub marks: Vec<i32>,
    pub default: YearRange,
}

impl YearSlider {
    pub fn for_span(min: i32, max: i32) -> Self {
        YearSlider {
            min,
            max,
            step: 1,
            min_span: MIN_SPAN,
            marks: (min..=max).step_by(MARK_EVERY).collect(),
            default: default_range(min, max),
        }
    }

    /// Check a requested range against the observed span.
    pub fn check(&self, start: i32, end: i32) -> Result<YearRange, Vec<FieldIssue>> {
        let mut issues = Vec::new();
        for (field, year) in [("start", start), ("end", end)] {
            if !(self.min..=self.max).contains(&year) {
                issues.push(FieldIssue {
                    field,
                    message: format!("{field} year {year} is outside {}-{}", self.min, self.max),
                });
            }
        }
        let range = YearRange::new(start, end).map_err(|err| {
            issues.push(FieldIssue {
                field: "start",
                message: err.to_string(),
            });
        });
        match range {
            Ok(range) if issues.is_empty() => Ok(range),
            _ => Err(issues),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSpec {
    pub years: YearSlider,
    pub sex: Vec<ControlOption>,
    pub age: Vec<ControlOption>,
    pub initial: DashboardState,
}

impl ControlSpec {
    pub fn for_span(min: i32, max: i32) -> Self {
        let years = YearSlider::for_span(min, max);
        let initial = DashboardState::new(years.default);
        ControlSpec {
            sex: Sex::ALL
                .iter()
                .map(|sex| ControlOption {
                    value: sex.code(),
                    label: sex.label(),
                })
                .collect(),
            age: AgeBracket::ALL
                .iter()
                .map(|age| ControlOption {
                    value: age.code(),
                    label: age.label(),
                })
                .collect(),
            years,
            initial,
        }
    }
}

/// 2006-2018 clamped into the span, widened to the minimum span when the data allows.
fn default_range(min: i32, max: i32) -> YearRange {
    let mut start = DEFAULT_START_YEAR.clamp(min, max);
    let mut end = DEFAULT_END_YEAR.clamp(min, max);
    if end - start < MIN_SPAN {
        end = (start + MIN_SPAN).min(max);
        start = (end - MIN_SPAN).max(min);
    }
    YearRange::spanning(start, end)
}
