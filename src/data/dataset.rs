//! In-memory wage/inflation table, loaded once and shared read-only.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::data::record::{AgeBracket, RecordKey, Sex, WageRecord};

pub const DEFAULT_DATASET_PATH: &str = "data/wages.csv";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed row at line {line}: {message}")]
    Malformed { line: u64, message: String },
    #[error("invalid record {key}: {message}")]
    InvalidRecord { key: String, message: String },
    #[error("duplicate record {0}")]
    DuplicateKey(RecordKey),
}

/// CSV row as written by the ingestion job.
#[derive(Debug, Deserialize)]
struct CsvRow {
    country: String,
    year: String,
    sex: Sex,
    age: AgeBracket,
    #[serde(default)]
    wages_value: Option<f64>,
    cumulative_sum: f64,
}

/// Immutable table sorted by (country, sex, age, year).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WageRecord>,
    index: HashMap<RecordKey, usize>,
    countries: Vec<String>,
    years: Vec<i32>,
}

impl Dataset {
    /// Build the table from already-parsed records. Rejects duplicate keys and
    /// records violating the value invariants.
    pub fn from_records(mut records: Vec<WageRecord>) -> Result<Self, DatasetError> {
        for record in &records {
            check_record(record)?;
        }
        records.sort_by_cached_key(WageRecord::key);

        let mut index = HashMap::with_capacity(records.len());
        let mut countries = BTreeSet::new();
        let mut years = BTreeSet::new();
        for (position, record) in records.iter().enumerate() {
            let key = record.key();
            if index.insert(key.clone(), position).is_some() {
                return Err(DatasetError::DuplicateKey(key));
            }
            countries.insert(record.country.clone());
            years.insert(record.year);
        }

        Ok(Dataset {
            records,
            index,
            countries: countries.into_iter().collect(),
            years: years.into_iter().collect(),
        })
    }

    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            countries = dataset.countries().len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse CSV with header `country,year,sex,age,wages_value,cumulative_sum`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut raw = csv::StringRecord::new();
        let mut records = Vec::new();
        while csv_reader.read_record(&mut raw)? {
            let line = raw.position().map_or(0, csv::Position::line);
            let row: CsvRow = raw.deserialize(Some(&headers))?;
            let year = parse_year(&row.year).ok_or_else(|| DatasetError::Malformed {
                line,
                message: format!("unparseable year '{}'", row.year),
            })?;
            records.push(WageRecord {
                country: row.country,
                year,
                sex: row.sex,
                age: row.age,
                wages_value: row.wages_value,
                cumulative_inflation: row.cumulative_sum,
            });
        }

        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[WageRecord] {
        &self.records
    }

    /// Distinct country codes, ascending.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Distinct observed years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    pub fn get(&self, country: &str, year: i32, sex: Sex, age: AgeBracket) -> Option<&WageRecord> {
        let key = RecordKey {
            country: country.to_string(),
            sex,
            age,
            year,
        };
        self.index.get(&key).map(|&position| &self.records[position])
    }

    /// All records of one (country, sex, age) stratum, year ascending.
    pub fn stratum(&self, country: &str, sex: Sex, age: AgeBracket) -> &[WageRecord] {
        fn stratum_of(record: &WageRecord) -> (&str, Sex, AgeBracket) {
            (record.country.as_str(), record.sex, record.age)
        }
        let wanted = (country, sex, age);
        let start = self.records.partition_point(|record| stratum_of(record) < wanted);
        let end = self.records.partition_point(|record| stratum_of(record) <= wanted);
        &self.records[start..end]
    }
}

/// Accepts `2006` as well as date-like values such as `2006-01-01`.
fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().split('-').next()?.parse().ok()
}

fn check_record(record: &WageRecord) -> Result<(), DatasetError> {
    let invalid = |message: &str| DatasetError::InvalidRecord {
        key: record.key().to_string(),
        message: message.to_string(),
    };
    if record.country.trim().is_empty() {
        return Err(invalid("country code is empty"));
    }
    if let Some(wage) = record.wages_value {
        if !wage.is_finite() || wage < 0.0 {
            return Err(invalid("wages_value must be a finite non-negative number"));
        }
    }
    if !record.cumulative_inflation.is_finite() || record.cumulative_inflation <= 0.0 {
        return Err(invalid("cumulative_sum must be a finite positive number"));
    }
    Ok(())
}
