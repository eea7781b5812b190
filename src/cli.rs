use std::path::PathBuf;

use crate::config::Config;
use crate::dashboard::{ChartRequest, DashboardContext};
use crate::data::boundary::BoundaryCollection;
use crate::data::dataset::Dataset;
use crate::data::record::{AgeBracket, Sex};
use crate::data::validate::{validate_dataset, ValidationSeverity};
use crate::engine::{compute_ratios, YearRange};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Ratios,
    Series,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("ratios") => Some(Command::Ratios),
        Some("series") => Some(Command::Series),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = Config::from_env();
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(&config),
        Some(Command::Ratios) => handle_ratios(&config, args),
        Some(Command::Series) => handle_series(&config, args),
        Some(Command::Validate) => handle_validate(&config, args),
        None => {
            eprintln!("usage: wagedash <serve|ratios|series|validate>");
            2
        }
    }
}

fn handle_serve(config: &Config) -> i32 {
    let ctx = match DashboardContext::load(&config.dataset_path, &config.boundaries_path) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("failed to load dashboard data: {err}");
            return 1;
        }
    };
    match server::run_server(&config.bind_addr, ctx, &config.static_dir) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_ratios(config: &Config, args: &[String]) -> i32 {
    let Some(range) = parse_range(args.get(2), args.get(3)) else {
        eprintln!("usage: wagedash ratios <start-year> <end-year> [--table]");
        return 2;
    };
    let as_table = args.iter().any(|arg| arg == "--table");

    let dataset = match Dataset::load_csv(&config.dataset_path) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("failed to load dataset: {err}");
            return 1;
        }
    };
    let ratios = compute_ratios(&dataset, range);

    if as_table {
        println!("country\tratio");
        for ratio in &ratios {
            println!("{}\t{:.2}", ratio.country, ratio.ratio);
        }
        return 0;
    }

    match serde_json::to_string_pretty(&ratios) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize ratios: {err}");
            1
        }
    }
}

fn handle_series(config: &Config, args: &[String]) -> i32 {
    const USAGE: &str = "usage: wagedash series <location> <sex> <age> <start-year> <end-year>";
    let (Some(location), Some(sex), Some(age), Some(years)) = (
        args.get(2),
        args.get(3).and_then(|raw| raw.parse::<Sex>().ok()),
        args.get(4).and_then(|raw| raw.parse::<AgeBracket>().ok()),
        parse_range(args.get(5), args.get(6)),
    ) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let ctx = match DashboardContext::load(&config.dataset_path, &config.boundaries_path) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("failed to load dashboard data: {err}");
            return 1;
        }
    };
    let view = ctx.chart_view(&ChartRequest {
        location: Some(location.clone()),
        sex,
        age,
        years,
    });

    match serde_json::to_string_pretty(&view) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize series: {err}");
            1
        }
    }
}

fn handle_validate(config: &Config, args: &[String]) -> i32 {
    let dataset_path = args.get(2).map_or(config.dataset_path.clone(), PathBuf::from);
    let boundaries_path = args
        .get(3)
        .map_or(config.boundaries_path.clone(), PathBuf::from);

    let dataset = match Dataset::load_csv(&dataset_path) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    let boundaries = match BoundaryCollection::load(&boundaries_path) {
        Ok(boundaries) => boundaries,
        Err(err) => {
            eprintln!("warning: {err}");
            BoundaryCollection::default()
        }
    };

    let report = validate_dataset(&dataset, &boundaries);
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            ValidationSeverity::Info => println!("{diagnostic}"),
            _ => eprintln!("{diagnostic}"),
        }
    }

    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s)",
            report.count(ValidationSeverity::Error)
        );
        1
    } else {
        println!(
            "validation passed: {} ({} records, {} warning(s))",
            dataset_path.display(),
            dataset.len(),
            report.count(ValidationSeverity::Warning)
        );
        0
    }
}

fn parse_range(start: Option<&String>, end: Option<&String>) -> Option<YearRange> {
    let start = start?.parse::<i32>().ok()?;
    let end = end?.parse::<i32>().ok()?;
    YearRange::new(start, end).ok()
}
