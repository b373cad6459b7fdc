//! OSRM routing service client.
//!
//! # Timeouts
//!
//! No request timeout is set unless one is configured. A routing service that
//! accepts the connection and never answers will hold the caller until the
//! peer closes it. Set [`OsrmConfig::timeout_secs`] (or
//! `WAYPATH_OSRM_TIMEOUT_SECS`) when the endpoint is publicly reachable.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::value::RawValue;

use crate::error::{DirectionsError, Result};
use crate::route::{RouteRequest, RouteResponse};

/// Public OSRM demo server.
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";

/// Configuration for the routing service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server, without the `/route/...` path.
    pub base_url: String,
    /// Request timeout in seconds. `None` means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl OsrmConfig {
    /// Create a configuration for the given OSRM base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `WAYPATH_OSRM_URL` | OSRM base URL | `http://router.project-osrm.org` |
    /// | `WAYPATH_OSRM_TIMEOUT_SECS` | Request timeout in seconds | None |
    ///
    /// Empty or unparsable values fall back to the default; an unparsable
    /// timeout is logged as a warning.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = var("WAYPATH_OSRM_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OSRM_URL.to_string());

        let timeout_secs =
            var("WAYPATH_OSRM_TIMEOUT_SECS").and_then(|s| match s.trim().parse() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    tracing::warn!(
                        value = %s,
                        "WAYPATH_OSRM_TIMEOUT_SECS is not a whole number of seconds, ignoring"
                    );
                    None
                }
            });

        Self {
            base_url,
            timeout_secs,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Client for the OSRM route service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| DirectionsError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the upstream URL for a route request.
    pub fn route_url(&self, request: &RouteRequest) -> String {
        request.url(&self.config.base_url)
    }

    /// Fetch a route and return the upstream JSON body unmodified.
    ///
    /// # Errors
    ///
    /// - [`DirectionsError::Request`] on transport failure
    /// - [`DirectionsError::UpstreamStatus`] if the status is not 200
    /// - [`DirectionsError::InvalidEncoding`] if the body is not UTF-8
    /// - [`DirectionsError::InvalidResponse`] if the body is not JSON
    pub async fn fetch_route(&self, request: &RouteRequest) -> Result<Box<RawValue>> {
        let url = self.route_url(request);
        tracing::debug!(url = %url, "Requesting route");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Routing service responded");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Routing service returned an error"
            );
            return Err(DirectionsError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        // Decoded strictly: `text()` would replace invalid UTF-8 with U+FFFD.
        let body = String::from_utf8(response.bytes().await?.to_vec())?;
        tracing::trace!(body = %body, "Routing response body");

        Ok(RawValue::from_string(body)?)
    }

    /// Fetch a route and decode it into a [`RouteResponse`].
    pub async fn fetch_route_summary(&self, request: &RouteRequest) -> Result<RouteResponse> {
        let raw = self.fetch_route(request).await?;
        Ok(serde_json::from_str(raw.get())?)
    }
}
