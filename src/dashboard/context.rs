//! Immutable dashboard context: the loaded table and boundaries, plus the
//! stateless handlers turning typed requests into view models.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dashboard::controls::{ControlSpec, FieldIssue, YearSlider};
use crate::dashboard::state::{ControlEvent, DashboardState};
use crate::dashboard::view::{ChartView, MapView};
use crate::data::boundary::BoundaryCollection;
use crate::data::country::{display_name, resolve_location};
use crate::data::dataset::{Dataset, DatasetError};
use crate::data::record::{AgeBracket, Sex};
use crate::engine::{compute_ratios, compute_series, SeriesQuery, YearRange};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("dataset has no records")]
    EmptyDataset,
}

/// Request for the comparison chart, as sent by a map click plus the radios.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub location: Option<String>,
    pub sex: Sex,
    pub age: AgeBracket,
    pub years: YearRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractRequest {
    pub state: DashboardState,
    pub event: ControlEvent,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractResponse {
    pub state: DashboardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
}

#[derive(Debug)]
pub struct DashboardContext {
    dataset: Dataset,
    boundaries: BoundaryCollection,
    slider: YearSlider,
    loaded_at: String,
}

impl DashboardContext {
    pub fn new(dataset: Dataset, boundaries: BoundaryCollection) -> Result<Self, ContextError> {
        let (min, max) = dataset.year_span().ok_or(ContextError::EmptyDataset)?;
        Ok(DashboardContext {
            dataset,
            boundaries,
            slider: YearSlider::for_span(min, max),
            loaded_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        })
    }

    /// Load the table (required) and boundaries (optional) once, for sharing
    /// across request handlers.
    pub fn load(dataset_path: &Path, boundaries_path: &Path) -> Result<Arc<Self>, ContextError> {
        let dataset = Dataset::load_csv(dataset_path)?;
        let boundaries = BoundaryCollection::load_or_empty(boundaries_path);
        Ok(Arc::new(Self::new(dataset, boundaries)?))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn boundaries(&self) -> &BoundaryCollection {
        &self.boundaries
    }

    pub fn loaded_at(&self) -> &str {
        &self.loaded_at
    }

    pub fn controls(&self) -> ControlSpec {
        ControlSpec::for_span(self.slider.min, self.slider.max)
    }

    pub fn check_range(&self, start: i32, end: i32) -> Result<YearRange, Vec<FieldIssue>> {
        self.slider.check(start, end)
    }

    pub fn countries(&self) -> Vec<CountryEntry> {
        self.dataset
            .countries()
            .iter()
            .map(|code| CountryEntry {
                code: code.clone(),
                name: display_name(code).to_string(),
            })
            .collect()
    }

    pub fn map_view(&self, years: YearRange) -> MapView {
        MapView::new(years, compute_ratios(&self.dataset, years))
    }

    pub fn chart_view(&self, request: &ChartRequest) -> ChartView {
        let query = SeriesQuery {
            country: resolve_location(request.location.as_deref()),
            sex: request.sex,
            age: request.age,
            start: request.years.start(),
            end: request.years.end(),
        };
        match compute_series(&self.dataset, &query) {
            Ok(series) => ChartView::from_series(series),
            Err(err) => {
                tracing::debug!(error = %err, "rendering empty chart");
                ChartView::no_data(&err)
            }
        }
    }

    /// Apply one interaction to the caller's state and recompute exactly the
    /// views that depend on it. Out-of-span years are rejected before any
    /// computation.
    pub fn interact(&self, request: InteractRequest) -> Result<InteractResponse, Vec<FieldIssue>> {
        let InteractRequest { mut state, event } = request;
        let refresh = state.apply(event);
        let years = self.check_range(state.years.start(), state.years.end())?;

        let map = refresh.map.then(|| self.map_view(years));
        let chart = refresh.series.then(|| {
            self.chart_view(&ChartRequest {
                location: state.country.clone(),
                sex: state.sex,
                age: state.age,
                years,
            })
        });

        Ok(InteractResponse { state, map, chart })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::WageRecord;

    fn context() -> DashboardContext {
        let records = ["FR", "EU27_2020"]
            .into_iter()
            .flat_map(|country| {
                (2004..=2019).map(move |year| WageRecord {
                    country: country.to_string(),
                    year,
                    sex: Sex::Total,
                    age: AgeBracket::Total,
                    wages_value: Some(1_000.0 + f64::from(year - 2004) * 10.0),
                    cumulative_inflation: 100.0 + f64::from(year - 2004),
                })
            })
            .collect();
        DashboardContext::new(
            Dataset::from_records(records).unwrap(),
            BoundaryCollection::default(),
        )
        .unwrap()
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = DashboardContext::new(Dataset::default(), BoundaryCollection::default()).unwrap_err();
        assert!(matches!(err, ContextError::EmptyDataset));
    }

    #[test]
    fn chart_without_click_shows_eu_aggregate() {
        let ctx = context();
        let view = ctx.chart_view(&ChartRequest {
            location: None,
            sex: Sex::Total,
            age: AgeBracket::Total,
            years: YearRange::new(2006, 2018).unwrap(),
        });
        assert_eq!(view.country, "EU27_2020");
        assert_eq!(view.years.len(), 13);
    }

    #[test]
    fn chart_for_missing_stratum_has_notice() {
        let ctx = context();
        let view = ctx.chart_view(&ChartRequest {
            location: Some("FR".into()),
            sex: Sex::Male,
            age: AgeBracket::Total,
            years: YearRange::new(2006, 2018).unwrap(),
        });
        assert!(view.notice.is_some());
        assert!(view.years.is_empty());
    }

    #[test]
    fn interact_recomputes_only_dependent_views() {
        let ctx = context();
        let state = ctx.controls().initial;

        let response = ctx
            .interact(InteractRequest {
                state: state.clone(),
                event: ControlEvent::Sex { sex: Sex::Female },
            })
            .unwrap();
        assert!(response.map.is_none());
        assert!(response.chart.is_some());
        assert_eq!(response.state.sex, Sex::Female);

        let response = ctx
            .interact(InteractRequest { state, event: ControlEvent::Load })
            .unwrap();
        let map = response.map.expect("load should render the map");
        let countries: Vec<_> = map.locations.iter().map(|l| l.country.as_str()).collect();
        assert_eq!(countries, vec!["EU27_2020", "FR"]);
    }

    #[test]
    fn interact_rejects_years_outside_span() {
        let ctx = context();
        let issues = ctx
            .interact(InteractRequest {
                state: ctx.controls().initial,
                event: ControlEvent::YearRange {
                    years: YearRange::new(1990, 2018).unwrap(),
                },
            })
            .unwrap_err();
        assert_eq!(issues[0].field, "start");
    }
}
