#![allow(dead_code)]

use wagedash::dashboard::DashboardContext;
use wagedash::data::boundary::BoundaryCollection;
use wagedash::data::dataset::Dataset;

/// FR and the EU aggregate track inflation exactly over 2000-2020; GB gains
/// 10% on inflation between 2006 and 2018; ES only reports 2006.
pub fn fixture_csv() -> String {
    let mut csv = String::from("country,year,sex,age,wages_value,cumulative_sum\n");
    for year in 2000..=2020 {
        let step = f64::from(year - 2000);
        let wage = 20_000.0 + 500.0 * step;
        let inflation = 100.0 + 2.5 * step;
        csv.push_str(&format!("FR,{year},T,TOTAL,{wage},{inflation}\n"));
        csv.push_str(&format!("EU27_2020,{year}-01-01,T,TOTAL,{wage},{inflation}\n"));
    }
    for year in 2010..=2014 {
        csv.push_str(&format!("FR,{year},F,TOTAL,18000,110\n"));
    }
    csv.push_str("GB,2006,T,TOTAL,30000,100\n");
    csv.push_str("GB,2012,T,TOTAL,,110\n");
    csv.push_str("GB,2018,T,TOTAL,33000,100\n");
    csv.push_str("ES,2006,T,TOTAL,18000,100\n");
    csv
}

pub fn fixture_geojson() -> String {
    let features: Vec<String> = ["FR", "UK", "ES"]
        .iter()
        .map(|code| {
            format!(r#"{{"type":"Feature","properties":{{"ISO2":"{code}"}},"geometry":null}}"#)
        })
        .collect();
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

pub fn fixture_context() -> DashboardContext {
    let dataset = Dataset::from_reader(fixture_csv().as_bytes()).expect("fixture dataset should parse");
    let boundaries =
        BoundaryCollection::from_json_str(&fixture_geojson()).expect("fixture boundaries should parse");
    DashboardContext::new(dataset, boundaries).expect("fixture context should build")
}
