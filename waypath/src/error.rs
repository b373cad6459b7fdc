//! Error types for the waypath library.

use thiserror::Error;

/// Errors that can occur when requesting directions.
#[derive(Error, Debug)]
pub enum DirectionsError {
    /// Origin or destination was not supplied.
    #[error("Origin and destination are required.")]
    MissingParameters,

    /// A coordinate string is not of the form `lat,lon`.
    #[error("Invalid coordinate '{input}': {reason}")]
    InvalidCoordinate { input: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Transport failure talking to the routing service.
    #[error("Routing request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The routing service answered with a status other than 200.
    #[error("Routing service returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// The routing service answered 200 with a body that is not valid JSON.
    #[error("Invalid routing response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The response body is not valid UTF-8.
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// The geocoder found nothing for an address.
    #[error("No results found for: {query}")]
    NoGeocodeResult { query: String },
}

impl DirectionsError {
    /// Whether the error was caused by the caller's input rather than the upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DirectionsError::MissingParameters | DirectionsError::InvalidCoordinate { .. }
        )
    }
}

/// Result type alias using [`DirectionsError`].
pub type Result<T> = std::result::Result<T, DirectionsError>;
