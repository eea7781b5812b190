//! View models rendered by the page: the choropleth and the comparison chart.

use serde::Serialize;

use crate::data::boundary::FEATURE_ID_KEY;
use crate::data::country::{boundary_code, display_name};
use crate::data::record::{AgeBracket, Sex};
use crate::engine::{CountryRatio, CountrySeries, SeriesError, YearRange};

pub const REAL_WAGE_TRACE: &str = "Salaire réel";
pub const INFLATION_TRACE: &str = "Inflation*";
pub const FOOTNOTE: &str =
    "* Salaire attendu si on prend uniquement l'évolution de l'inflation en compte";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub palette: &'static str,
    pub min: f64,
    pub max: f64,
    pub midpoint: f64,
}

/// Diverging scale over [0, 2], centred on wages tracking inflation exactly.
pub const RATIO_SCALE: ColorScale = ColorScale {
    palette: "RdYlBu",
    min: 0.0,
    max: 2.0,
    midpoint: 1.0,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub style: &'static str,
    pub zoom: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub opacity: f64,
}

pub const EUROPE_FRAME: MapFrame = MapFrame {
    style: "carto-positron",
    zoom: 3.0,
    center_lat: 52.0,
    center_lon: 10.0,
    opacity: 0.5,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLocation {
    pub country: String,
    /// Feature id in the boundary layer (`UK` for `GB`).
    pub location: String,
    pub name: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub years: YearRange,
    pub label: String,
    pub title: String,
    pub feature_id_key: &'static str,
    pub locations: Vec<MapLocation>,
    /// Countries present at both ends whose ratio is not a finite number.
    pub undefined: Vec<String>,
    pub color: ColorScale,
    pub frame: MapFrame,
}

impl MapView {
    pub fn new(years: YearRange, ratios: Vec<CountryRatio>) -> Self {
        let (defined, undefined): (Vec<_>, Vec<_>) =
            ratios.into_iter().partition(|ratio| ratio.ratio.is_finite());

        MapView {
            label: year_label(years),
            title: format!("[{}, {}]", years.start(), years.end()),
            feature_id_key: FEATURE_ID_KEY,
            locations: defined
                .into_iter()
                .map(|ratio| MapLocation {
                    location: boundary_code(&ratio.country).to_string(),
                    name: display_name(&ratio.country).to_string(),
                    country: ratio.country,
                    ratio: ratio.ratio,
                })
                .collect(),
            undefined: undefined.into_iter().map(|ratio| ratio.country).collect(),
            color: RATIO_SCALE,
            frame: EUROPE_FRAME,
            years,
        }
    }
}

pub fn year_label(years: YearRange) -> String {
    format!("Années: {} - {}", years.start(), years.end())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTrace {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub country: String,
    pub name: String,
    pub sex: Sex,
    pub age: AgeBracket,
    pub title: String,
    pub location_line: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    pub years: Vec<i32>,
    pub traces: Vec<ChartTrace>,
    pub footnote: &'static str,
    /// Set instead of data when the stratum has no records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ChartView {
    pub fn from_series(series: CountrySeries) -> Self {
        let name = display_name(&series.country).to_string();
        let years = series.points.iter().map(|point| point.year).collect();
        let real = series.points.iter().map(|point| point.real_wage).collect();
        let adjusted = series
            .points
            .iter()
            .map(|point| point.inflation_adjusted_wage)
            .collect();

        ChartView {
            title: format!(
                "Évolution du salaire médian comparé à l'inflation depuis {}",
                series.start_year
            ),
            location_line: format!("Lieu : {name}"),
            name,
            country: series.country,
            sex: series.sex,
            age: series.age,
            x_label: "Année",
            y_label: "Salaire médian (€)",
            start_year: Some(series.start_year),
            end_year: Some(series.end_year),
            years,
            traces: vec![
                ChartTrace {
                    name: REAL_WAGE_TRACE,
                    values: real,
                },
                ChartTrace {
                    name: INFLATION_TRACE,
                    values: adjusted,
                },
            ],
            footnote: FOOTNOTE,
            notice: None,
        }
    }

    /// Empty chart carrying a "no data" notice.
    pub fn no_data(error: &SeriesError) -> Self {
        let SeriesError::NoData {
            country,
            sex,
            age,
            start,
        } = error;
        let name = display_name(country).to_string();

        ChartView {
            title: "Évolution du salaire médian comparé à l'inflation".to_string(),
            location_line: format!("Lieu : {name}"),
            notice: Some(format!(
                "Pas de données pour {name} ({}, {}) à partir de {start}",
                sex.label(),
                age.label()
            )),
            name,
            country: country.clone(),
            sex: *sex,
            age: *age,
            x_label: "Année",
            y_label: "Salaire médian (€)",
            start_year: None,
            end_year: None,
            years: Vec::new(),
            traces: vec![
                ChartTrace {
                    name: REAL_WAGE_TRACE,
                    values: Vec::new(),
                },
                ChartTrace {
                    name: INFLATION_TRACE,
                    values: Vec::new(),
                },
            ],
            footnote: FOOTNOTE,
        }
    }
}
