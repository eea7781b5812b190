use serde::Serialize;

use crate::data::dataset::Dataset;
use crate::data::record::{AgeBracket, Sex};
use crate::engine::{round_to, YearRange};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRatio {
    pub country: String,
    /// Real wage growth over inflation-implied growth, 2 decimals. NaN or
    /// infinite when the wage base or end wage is missing or zero.
    pub ratio: f64,
}

/// Ratio of wage growth to inflation over `range`, for every country with a
/// Total/Total record at both ends of the range. Countries are ascending.
pub fn compute_ratios(dataset: &Dataset, range: YearRange) -> Vec<CountryRatio> {
    dataset
        .countries()
        .iter()
        .filter_map(|country| {
            let end = dataset.get(country, range.end(), Sex::Total, AgeBracket::Total)?;
            let start = dataset.get(country, range.start(), Sex::Total, AgeBracket::Total)?;

            let wage = end.wages_value.unwrap_or(f64::NAN);
            let inflation_factor = end.cumulative_inflation / start.cumulative_inflation;
            let expected = inflation_factor * wage_base(dataset, country, range).unwrap_or(f64::NAN);

            Some(CountryRatio {
                country: country.clone(),
                ratio: round_to(wage / expected, 2),
            })
        })
        .collect()
}

/// First observed Total/Total wage at or after the range start, within the range.
fn wage_base(dataset: &Dataset, country: &str, range: YearRange) -> Option<f64> {
    dataset
        .stratum(country, Sex::Total, AgeBracket::Total)
        .iter()
        .filter(|record| range.contains(record.year))
        .find_map(|record| record.wages_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::WageRecord;

    fn total(country: &str, year: i32, wage: Option<f64>, inflation: f64) -> WageRecord {
        WageRecord {
            country: country.to_string(),
            year,
            sex: Sex::Total,
            age: AgeBracket::Total,
            wages_value: wage,
            cumulative_inflation: inflation,
        }
    }

    fn linear_france() -> Vec<WageRecord> {
        (2000..=2020)
            .map(|year| {
                let step = f64::from(year - 2000);
                total("FR", year, Some(20_000.0 + 500.0 * step), 100.0 + 2.5 * step)
            })
            .collect()
    }

    fn range(start: i32, end: i32) -> YearRange {
        YearRange::new(start, end).unwrap()
    }

    #[test]
    fn france_tracking_inflation_scores_one() {
        let dataset = Dataset::from_records(linear_france()).unwrap();
        let ratios = compute_ratios(&dataset, range(2006, 2018));

        // wage(2018) = 29000, inflation 145/115, wage_base = 23000.
        let expected = round_to(29_000.0 / (145.0 / 115.0 * 23_000.0), 2);
        assert_eq!(ratios, vec![CountryRatio { country: "FR".into(), ratio: expected }]);
        assert_eq!(ratios[0].ratio, 1.0);
    }

    #[test]
    fn wages_outpacing_inflation_score_above_one() {
        let dataset = Dataset::from_records(vec![
            total("DE", 2010, Some(30_000.0), 100.0),
            total("DE", 2015, Some(36_000.0), 110.0),
        ])
        .unwrap();
        let ratios = compute_ratios(&dataset, range(2010, 2015));
        assert_eq!(ratios[0].ratio, 1.09);
    }

    #[test]
    fn single_year_range_cancels_inflation() {
        let dataset = Dataset::from_records(vec![
            total("IT", 2012, None, 104.0),
            total("IT", 2013, Some(25_000.0), 105.0),
        ])
        .unwrap();
        let ratios = compute_ratios(&dataset, range(2013, 2013));
        assert_eq!(ratios[0].ratio, 1.0);

        let dataset = Dataset::from_records(linear_france()).unwrap();
        for year in [2000, 2009, 2020] {
            assert_eq!(compute_ratios(&dataset, range(year, year))[0].ratio, 1.0);
        }
    }

    #[test]
    fn countries_missing_an_endpoint_are_excluded() {
        let mut records = linear_france();
        records.push(total("ES", 2006, Some(18_000.0), 100.0));
        records.push(total("PT", 2018, Some(12_000.0), 120.0));
        records.push(WageRecord {
            sex: Sex::Male,
            ..total("PL", 2006, Some(9_000.0), 100.0)
        });
        records.push(WageRecord {
            sex: Sex::Male,
            ..total("PL", 2018, Some(12_000.0), 130.0)
        });
        let dataset = Dataset::from_records(records).unwrap();

        let countries: Vec<_> = compute_ratios(&dataset, range(2006, 2018))
            .into_iter()
            .map(|ratio| ratio.country)
            .collect();
        assert_eq!(countries, vec!["FR".to_string()]);
    }

    #[test]
    fn no_country_with_both_endpoints_yields_empty_result() {
        let dataset = Dataset::from_records(linear_france()).unwrap();
        assert!(compute_ratios(&dataset, range(1990, 2010)).is_empty());
        assert!(compute_ratios(&Dataset::default(), range(2000, 2001)).is_empty());
    }

    #[test]
    fn wage_base_skips_gaps_at_range_start() {
        let dataset = Dataset::from_records(vec![
            total("HU", 2006, None, 100.0),
            total("HU", 2007, None, 105.0),
            total("HU", 2008, Some(10_000.0), 110.0),
            total("HU", 2010, Some(12_100.0), 121.0),
        ])
        .unwrap();
        // 12100 / (121/100 * 10000)
        assert_eq!(compute_ratios(&dataset, range(2006, 2010))[0].ratio, 1.0);
    }

    #[test]
    fn wage_base_outside_range_is_undefined() {
        let dataset = Dataset::from_records(vec![
            total("HU", 2006, None, 100.0),
            total("HU", 2007, None, 105.0),
            total("HU", 2008, Some(10_000.0), 110.0),
        ])
        .unwrap();
        let ratios = compute_ratios(&dataset, range(2006, 2007));
        assert_eq!(ratios.len(), 1);
        assert!(ratios[0].ratio.is_nan());
    }

    #[test]
    fn zero_wage_base_propagates_as_non_finite() {
        let dataset = Dataset::from_records(vec![
            total("LU", 2006, Some(0.0), 100.0),
            total("LU", 2007, Some(100.0), 101.0),
        ])
        .unwrap();
        let ratios = compute_ratios(&dataset, range(2006, 2007));
        assert!(!ratios[0].ratio.is_finite());
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let dataset = Dataset::from_records(linear_france()).unwrap();
        let first = compute_ratios(&dataset, range(2003, 2017));
        let second = compute_ratios(&dataset, range(2003, 2017));
        let bits = |ratios: &[CountryRatio]| ratios.iter().map(|r| r.ratio.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
    }
}
