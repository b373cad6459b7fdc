//! Address lookup through a Nominatim geocoder.
//!
//! Free-text addresses are resolved to a [`Coordinate`] with Nominatim's
//! `search?format=json&q=<address>` endpoint; the first match wins.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::coordinate::Coordinate;
use crate::error::{DirectionsError, Result};

/// Public OpenStreetMap Nominatim server.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("waypath/", env!("CARGO_PKG_VERSION"));

/// Configuration for the geocoder client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim server, without the `/search` path.
    pub base_url: String,
    /// Request timeout in seconds. `None` means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl GeocoderConfig {
    /// Create a configuration for the given Nominatim base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// One Nominatim search result.
///
/// Nominatim returns coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl Place {
    /// The result's position as a [`Coordinate`].
    pub fn coordinate(&self) -> Result<Coordinate> {
        format!("{},{}", self.lat, self.lon).parse()
    }
}

/// Client for the Nominatim search service.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    config: GeocoderConfig,
}

impl Geocoder {
    /// Create a new geocoder with the given configuration.
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| DirectionsError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Search for an address, returning every match in Nominatim's order.
    pub async fn search(&self, address: &str) -> Result<Vec<Place>> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(url = %url, address = address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", address)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), address = address, "Geocoder returned an error");
            return Err(DirectionsError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = String::from_utf8(response.bytes().await?.to_vec())?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Resolve an address to the coordinate of its first match.
    ///
    /// # Errors
    ///
    /// [`DirectionsError::NoGeocodeResult`] if nothing matches.
    pub async fn lookup(&self, address: &str) -> Result<Coordinate> {
        let places = self.search(address).await?;
        let place = places
            .first()
            .ok_or_else(|| DirectionsError::NoGeocodeResult {
                query: address.to_string(),
            })?;

        tracing::info!(
            address = address,
            display_name = %place.display_name,
            lat = %place.lat,
            lon = %place.lon,
            "Address resolved"
        );

        place.coordinate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{RawQuery, State},
        http::{header, StatusCode},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct StubNominatim {
        status: StatusCode,
        body: &'static str,
        queries: Arc<Mutex<Vec<String>>>,
    }

    async fn stub_search(
        State(stub): State<StubNominatim>,
        RawQuery(query): RawQuery,
    ) -> impl IntoResponse {
        stub.queries.lock().unwrap().push(query.unwrap_or_default());
        (
            stub.status,
            [(header::CONTENT_TYPE, "application/json")],
            stub.body,
        )
    }

    /// Start a stub geocoder, returning a client for it and its query log.
    async fn spawn_geocoder(
        status: StatusCode,
        body: &'static str,
    ) -> (Geocoder, Arc<Mutex<Vec<String>>>) {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let stub = StubNominatim {
            status,
            body,
            queries: queries.clone(),
        };

        let router = Router::new()
            .route("/search", get(stub_search))
            .with_state(stub);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let geocoder = Geocoder::new(GeocoderConfig::new(format!("http://{}/", addr))).unwrap();
        (geocoder, queries)
    }

    #[test]
    fn test_place_coordinate() {
        let place: Place = serde_json::from_str(
            r#"{"lat": "52.5170365", "lon": "13.3888599", "display_name": "Berlin, Deutschland", "importance": 0.9}"#,
        )
        .unwrap();
        let coord = place.coordinate().unwrap();
        assert_eq!(coord.to_string(), "52.5170365,13.3888599");
        assert_eq!(coord.to_lon_lat(), "13.3888599,52.5170365");
    }

    #[test]
    fn test_config_builder() {
        let config = GeocoderConfig::new("http://nominatim.internal").with_timeout(5);
        assert_eq!(config.base_url, "http://nominatim.internal");
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(GeocoderConfig::default().base_url, DEFAULT_NOMINATIM_URL);
    }

    #[tokio::test]
    async fn test_lookup_first_match() {
        let (geocoder, queries) = spawn_geocoder(
            StatusCode::OK,
            r#"[{"lat":"13.0827","lon":"80.2707","display_name":"Chennai"},{"lat":"1","lon":"2","display_name":"Other"}]"#,
        )
        .await;

        let coord = geocoder.lookup("Chennai Central").await.unwrap();
        assert_eq!(coord.lat(), 13.0827);
        assert_eq!(coord.lon(), 80.2707);

        let queries = queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("format=json"));
        assert!(queries[0].contains("q=Chennai+Central"));
    }

    #[tokio::test]
    async fn test_search_returns_all_matches() {
        let (geocoder, _) = spawn_geocoder(
            StatusCode::OK,
            r#"[{"lat":"1","lon":"2"},{"lat":"3","lon":"4"}]"#,
        )
        .await;

        let places = geocoder.search("anywhere").await.unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].lat, "3");
        assert!(places[0].display_name.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_no_results() {
        let (geocoder, _) = spawn_geocoder(StatusCode::OK, "[]").await;

        let err = geocoder.lookup("Atlantis").await.unwrap_err();
        assert!(matches!(err, DirectionsError::NoGeocodeResult { ref query } if query == "Atlantis"));
    }

    #[tokio::test]
    async fn test_lookup_upstream_error() {
        let (geocoder, _) = spawn_geocoder(StatusCode::TOO_MANY_REQUESTS, "[]").await;

        let err = geocoder.lookup("Berlin").await.unwrap_err();
        assert!(matches!(err, DirectionsError::UpstreamStatus { status: 429 }));
    }

    #[tokio::test]
    async fn test_lookup_invalid_body() {
        let (geocoder, _) = spawn_geocoder(StatusCode::OK, "<html></html>").await;

        let err = geocoder.lookup("Berlin").await.unwrap_err();
        assert!(matches!(err, DirectionsError::InvalidResponse(_)));
    }
}
