use crate::dashboard::DashboardContext;
use crate::server::api;
use crate::server::page;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(body: String) -> Self {
        HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(ctx: &DashboardContext, method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/") | ("GET", "/index.html") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: page::index_html(),
        },
        ("GET", "/api/health") => json_or_500(api::health_payload(ctx)),
        ("GET", "/api/controls") => json_or_500(api::controls_payload(ctx)),
        ("GET", "/api/countries") => json_or_500(api::countries_payload(ctx)),
        ("GET", "/api/boundaries") => json_or_500(api::boundaries_payload(ctx)),
        ("GET", "/api/map") => request_response(api::map_payload(ctx, path)),
        ("GET", "/api/series") => request_response(api::series_payload(ctx, path)),
        ("POST", "/api/interact") => request_response(api::interact_payload(ctx, body)),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_or_500(payload: Result<String, serde_json::Error>) -> HttpResponse {
    match payload {
        Ok(body) => HttpResponse::json(body),
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn request_response(payload: Result<String, api::RequestError>) -> HttpResponse {
    match payload {
        Ok(body) => HttpResponse::json(body),
        Err(api::RequestError::Parse(msg)) => error_response(400, "Bad Request", &msg),
        Err(api::RequestError::Validation(validation)) => {
            validation_error_response(400, "Bad Request", validation)
        }
        Err(err @ api::RequestError::Serialize(_)) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
