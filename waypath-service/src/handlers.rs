//! HTTP request handlers for the directions service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use waypath::{DirectionsError, RouteRequest};

use crate::AppState;

/// Body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "Directions service is running!";

/// Error message for any failure on the routing service side.
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch directions.";

/// Query parameters for the directions endpoint.
///
/// Both fields are optional so that a missing value produces the JSON error
/// body rather than a plain-text rejection.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DirectionsQuery {
    /// Start point as `lat,lon` (e.g. `52.517,13.389`).
    pub origin: Option<String>,
    /// End point as `lat,lon` (e.g. `52.529,13.397`).
    pub destination: Option<String>,
}

impl DirectionsQuery {
    /// Collect the known parameters from raw query pairs.
    ///
    /// A repeated parameter takes its last value; unknown parameters are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "origin" => query.origin = Some(value),
                "destination" => query.destination = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Get driving directions between two points.
///
/// Coordinates are swapped to `lon,lat` and forwarded to OSRM. The OSRM JSON
/// response is returned unmodified.
///
/// # Returns
///
/// - `200 OK` with the OSRM route response
/// - `400 Bad Request` if a coordinate is missing or malformed
/// - `500 Internal Server Error` if the routing service fails
#[utoipa::path(
    get,
    path = "/directions",
    tag = "directions",
    params(DirectionsQuery),
    responses(
        (status = 200, description = "OSRM route response, relayed as-is"),
        (status = 400, description = "Missing or malformed coordinates", body = ErrorResponse),
        (status = 500, description = "Routing service failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_directions(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = DirectionsQuery::from_pairs(pairs);

    tracing::info!(
        origin = ?query.origin,
        destination = ?query.destination,
        "Directions query"
    );

    let request =
        match RouteRequest::from_query(query.origin.as_deref(), query.destination.as_deref()) {
            Ok(request) => request,
            Err(e) => return error_response(e),
        };

    tracing::info!(
        url = %state.osrm_client.route_url(&request),
        "Forwarding to routing service"
    );

    match state.osrm_client.fetch_route(&request).await {
        Ok(body) => {
            tracing::info!(
                origin = %request.origin,
                destination = %request.destination,
                bytes = body.get().len(),
                "Directions found"
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Create an error response for directions queries.
///
/// Upstream detail is logged but not passed to the client.
fn error_response(e: DirectionsError) -> Response {
    let (status, message) = if e.is_client_error() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            FETCH_FAILED_MESSAGE.to_string(),
        )
    };

    tracing::warn!(status = status.as_u16(), error = %e, "Directions query failed");

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    )
)]
pub async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
