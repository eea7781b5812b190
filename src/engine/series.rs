use serde::{Deserialize, Serialize};

use crate::data::dataset::Dataset;
use crate::data::record::{AgeBracket, Sex};
use crate::engine::round_to;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesQuery {
    pub country: String,
    pub sex: Sex,
    pub age: AgeBracket,
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    /// Observed wage, rounded to the unit. `None` for years without an observation.
    pub real_wage: Option<f64>,
    /// First observed wage carried forward by the inflation index only.
    pub inflation_adjusted_wage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub sex: Sex,
    pub age: AgeBracket,
    pub start_year: i32,
    pub end_year: i32,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    #[error("no records for {country} (sex {sex}, age {age}) from {start}")]
    NoData {
        country: String,
        sex: Sex,
        age: AgeBracket,
        start: i32,
    },
}

/// Wage and inflation-only wage trajectories for one stratum.
///
/// The series starts at the first record at or after `query.start` and ends at
/// `query.end`, extended to one year past the first record when the range
/// would otherwise hold a single point (or none).
pub fn compute_series(dataset: &Dataset, query: &SeriesQuery) -> Result<CountrySeries, SeriesError> {
    let from_start: Vec<_> = dataset
        .stratum(&query.country, query.sex, query.age)
        .iter()
        .filter(|record| record.year >= query.start)
        .collect();

    let Some(first) = from_start.first() else {
        return Err(SeriesError::NoData {
            country: query.country.clone(),
            sex: query.sex,
            age: query.age,
            start: query.start,
        });
    };

    let start_year = first.year;
    let end_year = query.end.max(start_year + 1);
    let base_wage = first.wages_value;
    let base_inflation = first.cumulative_inflation;

    let points = from_start
        .iter()
        .take_while(|record| record.year <= end_year)
        .map(|record| SeriesPoint {
            year: record.year,
            real_wage: record.wages_value.map(|wage| round_to(wage, 0)),
            inflation_adjusted_wage: base_wage
                .map(|wage| round_to(record.cumulative_inflation / base_inflation * wage, 0)),
        })
        .collect();

    Ok(CountrySeries {
        country: query.country.clone(),
        sex: query.sex,
        age: query.age,
        start_year,
        end_year,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::WageRecord;

    fn record(year: i32, sex: Sex, wage: Option<f64>, inflation: f64) -> WageRecord {
        WageRecord {
            country: "FR".to_string(),
            year,
            sex,
            age: AgeBracket::Total,
            wages_value: wage,
            cumulative_inflation: inflation,
        }
    }

    fn france() -> Dataset {
        let mut records: Vec<_> = (2000..=2020)
            .map(|year| {
                let step = f64::from(year - 2000);
                record(year, Sex::Total, Some(20_000.0 + 500.0 * step), 100.0 + 2.5 * step)
            })
            .collect();
        records.extend((2010..=2014).map(|year| record(year, Sex::Female, Some(18_000.4), 110.0)));
        Dataset::from_records(records).unwrap()
    }

    fn query(sex: Sex, start: i32, end: i32) -> SeriesQuery {
        SeriesQuery {
            country: "FR".to_string(),
            sex,
            age: AgeBracket::Total,
            start,
            end,
        }
    }

    #[test]
    fn series_covers_requested_range() {
        let series = compute_series(&france(), &query(Sex::Total, 2006, 2018)).unwrap();
        assert_eq!(series.start_year, 2006);
        assert_eq!(series.end_year, 2018);
        assert_eq!(series.points.len(), 13);

        let first = &series.points[0];
        assert_eq!(first.real_wage, Some(23_000.0));
        assert_eq!(first.inflation_adjusted_wage, Some(23_000.0));

        let last = series.points.last().unwrap();
        assert_eq!(last.year, 2018);
        assert_eq!(last.real_wage, Some(29_000.0));
        assert_eq!(last.inflation_adjusted_wage, Some(29_000.0));
    }

    #[test]
    fn single_year_request_is_extended_to_two_points() {
        let series = compute_series(&france(), &query(Sex::Total, 2018, 2018)).unwrap();
        let years: Vec<_> = series.points.iter().map(|point| point.year).collect();
        assert_eq!(years, vec![2018, 2019]);
        assert_eq!(series.end_year, 2019);
    }

    #[test]
    fn data_starting_after_requested_end_is_clamped() {
        let series = compute_series(&france(), &query(Sex::Female, 2000, 2005)).unwrap();
        assert_eq!(series.start_year, 2010);
        let years: Vec<_> = series.points.iter().map(|point| point.year).collect();
        assert_eq!(years, vec![2010, 2011]);
        assert_eq!(series.points[0].real_wage, Some(18_000.0));
    }

    #[test]
    fn last_record_yields_single_point() {
        let series = compute_series(&france(), &query(Sex::Total, 2020, 2020)).unwrap();
        assert_eq!(series.points.len(), 1);
    }

    #[test]
    fn missing_wages_become_null_points() {
        let dataset = Dataset::from_records(vec![
            record(2006, Sex::Total, Some(1_000.0), 100.0),
            record(2007, Sex::Total, None, 103.0),
            record(2008, Sex::Total, Some(1_100.0), 106.0),
        ])
        .unwrap();
        let series = compute_series(&dataset, &query(Sex::Total, 2006, 2008)).unwrap();
        assert_eq!(series.points[1].real_wage, None);
        assert_eq!(series.points[1].inflation_adjusted_wage, Some(1_030.0));
        assert_eq!(series.points[2].inflation_adjusted_wage, Some(1_060.0));
    }

    #[test]
    fn empty_stratum_reports_no_data() {
        let err = compute_series(&france(), &query(Sex::Male, 2006, 2018)).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NoData {
                country: "FR".to_string(),
                sex: Sex::Male,
                age: AgeBracket::Total,
                start: 2006,
            }
        );
        assert!(compute_series(&france(), &query(Sex::Total, 2021, 2022)).is_err());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let dataset = france();
        let q = query(Sex::Total, 2001, 2011);
        assert_eq!(compute_series(&dataset, &q), compute_series(&dataset, &q));
    }
}
