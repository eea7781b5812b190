//! Ratio and series engine throughput on a synthetic 30-country table.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wagedash::data::dataset::Dataset;
use wagedash::data::record::{AgeBracket, Sex, WageRecord};
use wagedash::engine::{compute_ratios, compute_series, SeriesQuery, YearRange};

const COUNTRIES: [&str; 30] = [
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "HR", "HU", "IE",
    "IS", "IT", "LT", "LU", "LV", "MT", "NL", "NO", "PL", "PT", "RO", "SE", "SI", "SK", "GB",
];

fn synthetic_dataset() -> Dataset {
    let mut records = Vec::new();
    for (index, country) in COUNTRIES.iter().enumerate() {
        let base = 15_000.0 + 1_000.0 * index as f64;
        for sex in Sex::ALL {
            for age in AgeBracket::ALL {
                for year in 2000..=2022 {
                    let step = f64::from(year - 2000);
                    records.push(WageRecord {
                        country: (*country).to_string(),
                        year,
                        sex,
                        age,
                        wages_value: (year % 7 != 3).then_some(base * (1.0 + 0.03 * step)),
                        cumulative_inflation: 100.0 * (1.0 + 0.02 * step),
                    });
                }
            }
        }
    }
    match Dataset::from_records(records) {
        Ok(dataset) => dataset,
        Err(err) => panic!("synthetic dataset should build: {err}"),
    }
}

fn bench_engines(c: &mut Criterion) {
    let dataset = synthetic_dataset();

    let mut group = c.benchmark_group("engines");
    group.throughput(Throughput::Elements(COUNTRIES.len() as u64));

    let range = YearRange::spanning(2006, 2018);
    group.bench_function("ratios_2006_2018", |b| {
        b.iter(|| compute_ratios(black_box(&dataset), black_box(range)))
    });

    let query = SeriesQuery {
        country: "FR".to_string(),
        sex: Sex::Female,
        age: AgeBracket::From25To49,
        start: 2006,
        end: 2018,
    };
    group.bench_function("series_single_stratum", |b| {
        b.iter(|| compute_series(black_box(&dataset), black_box(&query)))
    });

    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
