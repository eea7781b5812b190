use std::collections::HashMap;

use serde::Serialize;

use crate::dashboard::controls::FieldIssue;
use crate::dashboard::{ChartRequest, DashboardContext, InteractRequest};
use crate::data::record::{AgeBracket, Sex};
use crate::engine::YearRange;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationErrorResponse {
    /// Group field issues by field, keeping first-seen field order.
    fn from_issues(issues: Vec<FieldIssue>) -> Self {
        let mut errors: Vec<ValidationIssue> = Vec::new();
        for issue in issues {
            match errors.iter_mut().find(|existing| existing.field == issue.field) {
                Some(existing) => existing.messages.push(issue.message),
                None => errors.push(ValidationIssue {
                    field: issue.field,
                    messages: vec![issue.message],
                }),
            }
        }
        ValidationErrorResponse {
            status: "error",
            message: "Validation failed",
            errors,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    Parse(String),
    #[error("invalid dashboard request")]
    Validation(ValidationErrorResponse),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<Vec<FieldIssue>> for RequestError {
    fn from(issues: Vec<FieldIssue>) -> Self {
        RequestError::Validation(ValidationErrorResponse::from_issues(issues))
    }
}

pub fn health_payload(ctx: &DashboardContext) -> Result<String, serde_json::Error> {
    let dataset = ctx.dataset();
    let years = dataset.year_span().map(|(min, max)| [min, max]);
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "wagedash",
        "version": env!("CARGO_PKG_VERSION"),
        "records": dataset.len(),
        "countries": dataset.countries().len(),
        "years": years,
        "boundary_features": ctx.boundaries().codes().count(),
        "loaded_at": ctx.loaded_at(),
    }))
}

pub fn controls_payload(ctx: &DashboardContext) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ctx.controls())
}

pub fn countries_payload(ctx: &DashboardContext) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ctx.countries())
}

pub fn boundaries_payload(ctx: &DashboardContext) -> Result<String, serde_json::Error> {
    serde_json::to_string(ctx.boundaries().geojson())
}

/// GET /api/map?start=&end= (both default to the slider's initial range).
pub fn map_payload(ctx: &DashboardContext, path: &str) -> Result<String, RequestError> {
    let query = parse_query(path)?;
    let mut issues = Vec::new();
    let Some(years) = years_from_query(ctx, &query, &mut issues) else {
        return Err(issues.into());
    };
    Ok(serde_json::to_string_pretty(&ctx.map_view(years))?)
}

/// GET /api/series?location=&sex=&age=&start=&end=
pub fn series_payload(ctx: &DashboardContext, path: &str) -> Result<String, RequestError> {
    let query = parse_query(path)?;

    let mut issues = Vec::new();
    let sex = parse_field::<Sex>(&query, "sex", &mut issues).unwrap_or(Sex::Total);
    let age = parse_field::<AgeBracket>(&query, "age", &mut issues).unwrap_or(AgeBracket::Total);
    let years = years_from_query(ctx, &query, &mut issues);
    let Some(years) = years.filter(|_| issues.is_empty()) else {
        return Err(issues.into());
    };

    let request = ChartRequest {
        location: query.get("location").cloned(),
        sex,
        age,
        years,
    };
    Ok(serde_json::to_string_pretty(&ctx.chart_view(&request))?)
}

/// POST /api/interact with `{ "state": ..., "event": ... }`.
pub fn interact_payload(ctx: &DashboardContext, body: &str) -> Result<String, RequestError> {
    let request: InteractRequest = serde_json::from_str(body)
        .map_err(|err| RequestError::Parse(format!("Invalid request body: {err}")))?;
    let response = ctx.interact(request)?;
    Ok(serde_json::to_string_pretty(&response)?)
}

fn years_from_query(
    ctx: &DashboardContext,
    query: &HashMap<String, String>,
    issues: &mut Vec<FieldIssue>,
) -> Option<YearRange> {
    let default = ctx.controls().years.default;
    let start = parse_field::<i32>(query, "start", issues);
    let end = parse_field::<i32>(query, "end", issues);
    if query.contains_key("start") && start.is_none() || query.contains_key("end") && end.is_none() {
        return None;
    }
    let start = start.unwrap_or(default.start());
    let end = end.unwrap_or(default.end());
    ctx.check_range(start, end)
        .map_err(|range_issues| issues.extend(range_issues))
        .ok()
}

/// Parse an optional query field, recording a validation issue when present but invalid.
fn parse_field<T>(
    query: &HashMap<String, String>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = query.get(field)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            issues.push(FieldIssue {
                field,
                message: format!("invalid {field} '{raw}': {err}"),
            });
            None
        }
    }
}

fn parse_query(path: &str) -> Result<HashMap<String, String>, RequestError> {
    let Some((_, query)) = path.split_once('?') else {
        return Ok(HashMap::new());
    };
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |raw: &str| {
                urlencoding::decode(&raw.replace('+', " "))
                    .map(|decoded| decoded.into_owned())
                    .map_err(|err| RequestError::Parse(format!("Invalid query string: {err}")))
            };
            Ok((decode(key)?, decode(value)?))
        })
        .filter(|entry| !matches!(entry, Ok((_, value)) if value.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_are_decoded_and_blank_values_dropped() {
        let query = parse_query("/api/series?location=FR&age=Y50%2D64&sex=&start=2006").unwrap();
        assert_eq!(query.get("location").map(String::as_str), Some("FR"));
        assert_eq!(query.get("age").map(String::as_str), Some("Y50-64"));
        assert!(!query.contains_key("sex"));
        assert!(parse_query("/api/map").unwrap().is_empty());
    }

    #[test]
    fn invalid_escapes_are_parse_errors() {
        assert!(matches!(
            parse_query("/api/map?start=%FF%FE"),
            Err(RequestError::Parse(_))
        ));
    }

    #[test]
    fn issues_are_grouped_per_field() {
        let response = ValidationErrorResponse::from_issues(vec![
            FieldIssue { field: "start", message: "a".into() },
            FieldIssue { field: "end", message: "b".into() },
            FieldIssue { field: "start", message: "c".into() },
        ]);
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].messages, vec!["a".to_string(), "c".to_string()]);
    }
}
