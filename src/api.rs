//! HTTP API for region lookups.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::RegionSummary;
use crate::pip::{LookupResult, PipService};

/// Upper bound on points accepted by a single batch request
pub const MAX_BATCH_POINTS: usize = 10_000;

/// Application state shared across handlers
pub struct AppState {
    pub pip: PipService,
}

impl AppState {
    pub fn new(pip: PipService) -> Self {
        Self { pip }
    }
}

/// Build the router with all routes and layers
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/stateserver", get(state_handler))
        .route("/stateserver/", get(state_handler))
        .route("/v1/lookup", get(lookup_handler).post(batch_handler))
        .route("/v1/regions", get(regions_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Usage banner
async fn index_handler() -> &'static str {
    "Hello! Please visit localhost:8080/stateserver/?longitude=<longitude>&latitude=<latitude>"
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        regions: state.pip.catalog().len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    regions: usize,
}

/// Plain-text lookup: the body is the region name or "Not Found"
async fn state_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordinateParams>,
) -> Result<String, (StatusCode, String)> {
    let (lon, lat) = params.validate()?;
    Ok(state.pip.lookup_name(lon, lat))
}

/// JSON lookup
async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordinateParams>,
) -> Result<Json<LookupResult>, (StatusCode, String)> {
    let (lon, lat) = params.validate()?;
    Ok(Json(state.pip.lookup(lon, lat)))
}

/// Batch lookup of many [lon, lat] pairs
async fn batch_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, (StatusCode, String)> {
    if request.points.len() > MAX_BATCH_POINTS {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "at most {} points per request, got {}",
                MAX_BATCH_POINTS,
                request.points.len()
            ),
        ));
    }

    for &[lon, lat] in &request.points {
        validate_coordinate(lon, lat)?;
    }

    let pip = state.pip.clone();
    let results = tokio::task::spawn_blocking(move || pip.lookup_batch(&request.points))
        .await
        .map_err(|e| {
            tracing::error!("Batch lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(BatchResponse { results }))
}

/// Every region in lookup order
async fn regions_handler(State(state): State<Arc<AppState>>) -> Json<Vec<RegionSummary>> {
    Json(
        state
            .pip
            .catalog()
            .regions()
            .iter()
            .map(|region| region.summary())
            .collect(),
    )
}

#[derive(Deserialize)]
struct CoordinateParams {
    /// Point longitude
    longitude: f64,
    /// Point latitude
    latitude: f64,
}

impl CoordinateParams {
    fn validate(&self) -> Result<(f64, f64), (StatusCode, String)> {
        validate_coordinate(self.longitude, self.latitude)
    }
}

/// Accept only finite WGS84 ranges.
///
/// NaN and infinities parse as valid floats, and huge finite values overflow
/// to infinity once scaled for rounding.
fn validate_coordinate(lon: f64, lat: f64) -> Result<(f64, f64), (StatusCode, String)> {
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "longitude must be a finite number in [-180, 180] and latitude in [-90, 90], got ({}, {})",
                lon, lat
            ),
        ));
    }
    Ok((lon, lat))
}

#[derive(Deserialize)]
struct BatchRequest {
    points: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<String>,
}
