//! Waypath Service - HTTP microservice for driving directions.
//!
//! Accepts `lat,lon` origin and destination pairs and relays the route from an
//! OSRM server.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `WAYPATH_OSRM_URL` | OSRM base URL | `http://router.project-osrm.org` |
//! | `WAYPATH_OSRM_TIMEOUT_SECS` | Upstream request timeout in seconds | None (no timeout) |
//! | `WAYPATH_PORT` | HTTP server port | 8000 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /directions?origin=LAT,LON&destination=LAT,LON` - Driving route
//! - `GET /` - Liveness check
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waypath::{OsrmClient, OsrmConfig};
use waypath_service::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waypath_service=info,waypath=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("WAYPATH_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);

    // The library handles: WAYPATH_OSRM_URL, WAYPATH_OSRM_TIMEOUT_SECS
    let config = OsrmConfig::from_env();

    if config.timeout_secs.is_none() {
        tracing::warn!("No upstream timeout configured, requests to the routing service may hang");
    }

    tracing::info!(
        osrm_url = %config.base_url,
        timeout_secs = ?config.timeout_secs,
        port = port,
        "Starting Waypath service"
    );

    let osrm_client = OsrmClient::new(config)?;
    let state = Arc::new(AppState { osrm_client });

    let app = waypath_service::app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
