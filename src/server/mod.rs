use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::dashboard::DashboardContext;

pub mod api;
mod page;
pub mod routes;

use routes::HttpResponse;

/// Serve the dashboard until interrupted.
pub fn run_server(bind_addr: &str, ctx: Arc<DashboardContext>, static_dir: &Path) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!("wagedash listening on http://{bind_addr}");
        axum::serve(listener, router(ctx, static_dir))
            .with_graceful_shutdown(shutdown_signal())
            .await
    })
}

/// All routes go through `route_request`; `/static` is served from disk when
/// the directory exists.
pub fn router(ctx: Arc<DashboardContext>, static_dir: &Path) -> Router {
    let mut router = Router::new().fallback(dispatch).with_state(ctx);
    if static_dir.is_dir() {
        router = router.nest_service("/static", ServeDir::new(static_dir));
    } else {
        tracing::debug!(dir = %static_dir.display(), "static directory not found, skipping");
    }
    router.layer(TraceLayer::new_for_http())
}

async fn dispatch(
    State(ctx): State<Arc<DashboardContext>>,
    method: Method,
    uri: Uri,
    body: String,
) -> HttpResponse {
    let path = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    let response = routes::route_request(&ctx, method.as_str(), path, &body);
    if response.status_code >= 500 {
        tracing::error!(%method, path, body = %response.body, "request failed");
    }
    response
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
