//! Waypath Service Library
//!
//! HTTP handlers, routing table and OpenAPI document for the directions
//! service. This library is used by both the waypath-service binary and
//! integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use waypath::OsrmClient;

/// Application state shared across handlers.
pub struct AppState {
    /// Client for the upstream routing service.
    pub osrm_client: OsrmClient,
}

/// OpenAPI documentation for the Waypath service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Waypath Directions Service",
        version = "0.1.0",
        description = "Driving directions proxied to an OSRM routing service.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Pedro Sanz Martinez", url = "https://github.com/pedrosanzmtz/waypath")
    ),
    paths(
        handlers::get_directions,
        handlers::home,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "directions", description = "Route queries"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router.
///
/// | Method | Path | Handler |
/// |--------|------|---------|
/// | GET | `/` | [`handlers::home`] |
/// | GET | `/directions` | [`handlers::get_directions`] |
/// | GET | `/health` | [`handlers::health_check`] |
/// | GET | `/docs` | Swagger UI |
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::home))
        .route("/directions", get(handlers::get_directions))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{DirectionsQuery, ErrorResponse, HealthResponse};
