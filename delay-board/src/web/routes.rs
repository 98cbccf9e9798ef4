//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tracing::error;

use crate::feed::VehicleFeed;

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<F: VehicleFeed>(state: AppState<F>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page::<F>))
        .route("/health", get(health))
        .route("/api/delays", get(delays::<F>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Delay board page. `?force=true` requests a forced refresh.
async fn index_page<F: VehicleFeed>(
    State(state): State<AppState<F>>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, AppError> {
    let view = state.cache.get_snapshot(query.is_forced(), Utc::now()).await;

    let html = IndexTemplate::from_view(&view)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

    Ok(Html(html))
}

/// The same snapshot as JSON.
async fn delays<F: VehicleFeed>(
    State(state): State<AppState<F>>,
    Query(query): Query<RefreshQuery>,
) -> Json<DelaysResponse> {
    let view = state.cache.get_snapshot(query.is_forced(), Utc::now()).await;
    Json(DelaysResponse::from_view(&view))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
