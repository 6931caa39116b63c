//! HTTP boundary
//!
//! Thin axum layer over [`SearchService`]: deserializes the POST body into a
//! typed [`SearchRequest`], validates it before it reaches the core, and
//! picks the response status from the failure variant (success and failure
//! never share a status).

use crate::error::Error;
use crate::record::{SearchRequest, SearchResultItem};
use crate::service::SearchService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
}

/// `POST /search` body: `{"coordinates": {"lat": .., "lon": ..}, "distance": ..}`.
/// `distance` (meters) is optional; the service fills in the configured
/// default.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    coordinates: BodyCoordinates,
    distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BodyCoordinates {
    lat: f64,
    lon: f64,
}

impl From<SearchBody> for SearchRequest {
    fn from(body: SearchBody) -> Self {
        SearchRequest::new(body.coordinates.lat, body.coordinates.lon, body.distance)
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", post(search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "홈 화면 출력" }))
}

async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> Result<Json<Vec<SearchResultItem>>, ApiError> {
    let request = SearchRequest::from(body);
    request.validate()?;
    let items = state.service.search(&request)?;
    Ok(Json(items))
}

/// Failure leaving the HTTP boundary. The status encodes the variant:
/// 400 for boundary validation, 503 when the store handle is unusable,
/// 500 for any other query failure.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
