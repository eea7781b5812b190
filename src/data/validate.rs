use std::collections::BTreeSet;
use std::fmt;

use crate::data::boundary::BoundaryCollection;
use crate::data::country::{boundary_code, resolve_location, EU_AGGREGATE};
use crate::data::dataset::Dataset;
use crate::data::record::{AgeBracket, Sex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Coverage checks on a loaded dataset and its boundary layer. Per-record
/// invariants are already enforced when the table is built.
pub fn validate_dataset(dataset: &Dataset, boundaries: &BoundaryCollection) -> ValidationReport {
    let mut report = ValidationReport::default();

    if dataset.is_empty() {
        report.push(ValidationSeverity::Error, "dataset", "no records");
        return report;
    }

    for country in dataset.countries() {
        let totals = dataset.stratum(country, Sex::Total, AgeBracket::Total);
        if totals.is_empty() {
            report.push(
                ValidationSeverity::Error,
                country.as_str(),
                "no Total/Total records; country cannot appear on the map",
            );
            continue;
        }

        let missing_years: Vec<String> = totals
            .windows(2)
            .flat_map(|pair| (pair[0].year + 1)..pair[1].year)
            .map(|year| year.to_string())
            .collect();
        if !missing_years.is_empty() {
            report.push(
                ValidationSeverity::Warning,
                country.as_str(),
                format!("Total/Total years missing: {}", missing_years.join(", ")),
            );
        }

        let wage_gaps = totals.iter().filter(|record| record.wages_value.is_none()).count();
        if wage_gaps > 0 {
            report.push(
                ValidationSeverity::Info,
                country.as_str(),
                format!("{wage_gaps} Total/Total year(s) without a wage observation"),
            );
        }
    }

    check_geometry(dataset, boundaries, &mut report);
    report
}

fn check_geometry(dataset: &Dataset, boundaries: &BoundaryCollection, report: &mut ValidationReport) {
    if boundaries.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            "boundaries",
            "no boundary features loaded; the map will be blank",
        );
        return;
    }

    for country in dataset.countries() {
        if country == EU_AGGREGATE {
            continue;
        }
        if !boundaries.contains(boundary_code(country)) {
            report.push(
                ValidationSeverity::Warning,
                country.as_str(),
                "no boundary feature; country will not be drawn",
            );
        }
    }

    let known: BTreeSet<&str> = dataset.countries().iter().map(String::as_str).collect();
    let orphans: Vec<&str> = boundaries
        .codes()
        .filter(|&code| !known.contains(resolve_location(Some(code)).as_str()))
        .collect();
    if !orphans.is_empty() {
        report.push(
            ValidationSeverity::Info,
            "boundaries",
            format!("features without data: {}", orphans.join(", ")),
        );
    }
}
