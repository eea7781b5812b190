use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sex stratum, serialized with the source codes (`T`, `M`, `F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "T")]
    Total,
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Total, Sex::Male, Sex::Female];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Total => "T",
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Male => "Hommes",
            Self::Female => "Femmes",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = UnknownCode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "T" | "t" => Ok(Self::Total),
            "M" | "m" => Ok(Self::Male),
            "F" | "f" => Ok(Self::Female),
            other => Err(UnknownCode {
                kind: "sex",
                value: other.to_string(),
            }),
        }
    }
}

/// Age bracket stratum, serialized with the source codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "TOTAL")]
    Total,
    #[serde(rename = "Y_GE65")]
    From65,
    #[serde(rename = "Y50-64")]
    From50To64,
    #[serde(rename = "Y25-49")]
    From25To49,
    #[serde(rename = "Y16-24")]
    From16To24,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::Total,
        AgeBracket::From65,
        AgeBracket::From50To64,
        AgeBracket::From25To49,
        AgeBracket::From16To24,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Total => "TOTAL",
            Self::From65 => "Y_GE65",
            Self::From50To64 => "Y50-64",
            Self::From25To49 => "Y25-49",
            Self::From16To24 => "Y16-24",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::From65 => "Plus de 65 ans",
            Self::From50To64 => "50-64 ans",
            Self::From25To49 => "25-49 ans",
            Self::From16To24 => "16-24 ans",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AgeBracket {
    type Err = UnknownCode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        AgeBracket::ALL
            .into_iter()
            .find(|bracket| bracket.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCode {
                kind: "age",
                value: trimmed.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code '{value}'")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

/// One row of the wage/inflation table.
///
/// `wages_value` is `None` when the source has no wage observation for that
/// year; the inflation index is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WageRecord {
    pub country: String,
    pub year: i32,
    pub sex: Sex,
    pub age: AgeBracket,
    pub wages_value: Option<f64>,
    pub cumulative_inflation: f64,
}

impl WageRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            country: self.country.clone(),
            sex: self.sex,
            age: self.age,
            year: self.year,
        }
    }
}

/// Unique key of a record. Field order defines the table's sort order, so a
/// (country, sex, age) stratum is a contiguous, year-ascending run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub country: String,
    pub sex: Sex,
    pub age: AgeBracket,
    pub year: i32,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.country, self.year, self.sex, self.age)
    }
}
