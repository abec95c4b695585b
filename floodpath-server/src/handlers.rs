//! HTTP handlers for the evacuation routing API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use floodpath_core::prelude::*;

use crate::state::AppState;

/// Error payload; maps core errors onto HTTP statuses
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::InvalidCoordinate { .. } => StatusCode::BAD_REQUEST,
            Error::NoRoute => StatusCode::NOT_FOUND,
            Error::EmptyNetwork => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api/evac/route", get(evac_route))
        .route("/api/flood/refresh", post(flood_refresh))
        .with_state(state)
}

async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "floodpath-server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "route": "/api/evac/route?start=lat,lon&end=lat,lon",
            "refresh": "/api/flood/refresh",
            "health": "/health",
        },
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    let slot = state.snapshot();
    if slot.graph.node_count() == 0 {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "reason": "road network is empty",
            })),
        )
            .into_response();
    }
    Json(json!({
        "status": "healthy",
        "nodes_count": slot.graph.node_count(),
        "segments_count": slot.graph.segment_count(),
        "flooded_segments": slot.summary.flooded_segments,
        "classified_at": slot.summary.classified_at,
        "uptime_secs": (Utc::now() - state.started_at).num_seconds(),
    }))
    .into_response()
}

#[derive(Deserialize)]
struct RouteQuery {
    start: Option<String>,
    end: Option<String>,
}

async fn evac_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Response, ApiError> {
    let start = parse_coordinate("start", require("start", &query.start)?)?;
    let end = parse_coordinate("end", require("end", &query.end)?)?;

    let slot = state.snapshot();
    let route = find_evacuation_route(&slot.graph, start, end)?;
    tracing::debug!(
        distance_m = route.distance_m,
        flooded = route.flooded_segments,
        "route computed"
    );
    Ok(Json(route.to_geojson()?).into_response())
}

async fn flood_refresh(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let network = state.network.clone();
    let scene = state.scene;
    let built = tokio::task::spawn_blocking(move || -> Result<(RoadGraph, FloodSummary), Error> {
        let mut graph = create_road_graph(&network)?;
        let summary = classify_flood_risk(&mut graph, &scene);
        Ok((graph, summary))
    })
    .await
    .map_err(|e| ApiError::internal(format!("refresh task failed: {e}")))?;

    let (graph, summary) = built?;
    state.install(graph, summary.clone());
    tracing::info!(
        total = summary.total_segments,
        flooded = summary.flooded_segments,
        "flood classification refreshed"
    );
    Ok(Json(json!({
        "status": "refreshed",
        "total_segments": summary.total_segments,
        "flooded_segments": summary.flooded_segments,
        "threshold_db": summary.threshold_db,
        "classified_at": summary.classified_at,
    }))
    .into_response())
}

fn require<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .ok_or_else(|| ApiError::bad_request(format!("missing query parameter: {name}")))
}

/// Parses a `lat,lon` query value into a validated coordinate
fn parse_coordinate(name: &str, raw: &str) -> Result<Coordinate, ApiError> {
    let (lat, lon) = raw.split_once(',').ok_or_else(|| {
        ApiError::bad_request(format!("{name} must be formatted as 'lat,lon', got '{raw}'"))
    })?;
    let lat: f64 = lat.trim().parse().map_err(|_| {
        ApiError::bad_request(format!("{name}: latitude '{}' is not a number", lat.trim()))
    })?;
    let lon: f64 = lon.trim().parse().map_err(|_| {
        ApiError::bad_request(format!("{name}: longitude '{}' is not a number", lon.trim()))
    })?;
    Ok(Coordinate::new(lat, lon)?)
}
