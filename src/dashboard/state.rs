//! Interaction state owned by the browser, and the refresh rules applied to it.

use serde::{Deserialize, Serialize};

use crate::data::country::resolve_location;
use crate::data::record::{AgeBracket, Sex};
use crate::engine::YearRange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub years: YearRange,
    pub sex: Sex,
    pub age: AgeBracket,
    /// Dataset code of the clicked country; `None` until the map is clicked.
    #[serde(default)]
    pub country: Option<String>,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    Load,
    YearRange { years: YearRange },
    Sex { sex: Sex },
    Age { age: AgeBracket },
    MapClick { location: Option<String> },
}

/// Views to recompute after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Refresh {
    pub map: bool,
    pub series: bool,
}

impl DashboardState {
    pub fn new(years: YearRange) -> Self {
        DashboardState {
            years,
            sex: Sex::Total,
            age: AgeBracket::Total,
            country: None,
        }
    }

    /// Country the chart shows: the clicked one, or the EU aggregate.
    pub fn selected_country(&self) -> String {
        resolve_location(self.country.as_deref())
    }

    /// Apply an event and report which views depend on what changed. The
    /// chart always has a country (the EU aggregate by default), so a year
    /// change refreshes both views.
    pub fn apply(&mut self, event: ControlEvent) -> Refresh {
        match event {
            ControlEvent::Load => Refresh {
                map: true,
                series: true,
            },
            ControlEvent::YearRange { years } => {
                self.years = years;
                Refresh {
                    map: true,
                    series: true,
                }
            }
            ControlEvent::Sex { sex } => {
                self.sex = sex;
                Refresh {
                    map: false,
                    series: true,
                }
            }
            ControlEvent::Age { age } => {
                self.age = age;
                Refresh {
                    map: false,
                    series: true,
                }
            }
            ControlEvent::MapClick { location } => {
                self.country = location
                    .as_deref()
                    .map(|code| resolve_location(Some(code)));
                Refresh {
                    map: false,
                    series: true,
                }
            }
        }
    }
}
