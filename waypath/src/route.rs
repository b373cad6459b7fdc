//! Route request and response types.

use geojson::{Geometry, Value as GeoJsonValue};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{DirectionsError, Result};

/// Path of the OSRM route service for the driving profile.
pub const ROUTE_API_PATH: &str = "/route/v1/driving/";

/// Query string asking for the full overview geometry encoded as GeoJSON.
pub const ROUTE_QUERY: &str = "overview=full&geometries=geojson";

/// A driving route request between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Start of the route.
    pub origin: Coordinate,
    /// End of the route.
    pub destination: Coordinate,
}

impl RouteRequest {
    /// Create a request from already parsed coordinates.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Build a request from raw `lat,lon` query values.
    ///
    /// Absent and empty values are both treated as missing.
    ///
    /// # Errors
    ///
    /// - [`DirectionsError::MissingParameters`] if either value is missing
    /// - [`DirectionsError::InvalidCoordinate`] if either value is malformed
    pub fn from_query(origin: Option<&str>, destination: Option<&str>) -> Result<Self> {
        let (origin, destination) = match (origin, destination) {
            (Some(o), Some(d)) if !o.is_empty() && !d.is_empty() => (o, d),
            _ => return Err(DirectionsError::MissingParameters),
        };

        Ok(Self::new(origin.parse()?, destination.parse()?))
    }

    /// The coordinates path segment in OSRM order, e.g. `56.78,12.34;22.22,11.11`.
    pub fn coordinates_path(&self) -> String {
        format!(
            "{};{}",
            self.origin.to_lon_lat(),
            self.destination.to_lon_lat()
        )
    }

    /// Full route URL against the given OSRM base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypath::RouteRequest;
    ///
    /// let request = RouteRequest::from_query(Some("12.34,56.78"), Some("11.11,22.22")).unwrap();
    /// assert_eq!(
    ///     request.url("http://router.project-osrm.org"),
    ///     "http://router.project-osrm.org/route/v1/driving/56.78,12.34;22.22,11.11?overview=full&geometries=geojson"
    /// );
    /// ```
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}{}{}?{}",
            base_url.trim_end_matches('/'),
            ROUTE_API_PATH,
            self.coordinates_path(),
            ROUTE_QUERY
        )
    }
}

/// Typed view over an OSRM route response.
///
/// Only the fields the CLI reports on are modelled; the proxy relays the
/// untouched body instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    /// `"Ok"` on success, otherwise an OSRM error code such as `"NoRoute"`.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl RouteResponse {
    /// Whether OSRM reported success.
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// The first (best) route, if any.
    pub fn best_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}

/// A single route alternative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Distance in meters.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Route geometry, a GeoJSON LineString in `[lon, lat]` order.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Route {
    /// Number of positions in the route geometry.
    pub fn point_count(&self) -> usize {
        match self.geometry.as_ref().map(|g| &g.value) {
            Some(GeoJsonValue::LineString(coords)) => coords.len(),
            Some(GeoJsonValue::MultiLineString(lines)) => lines.iter().map(Vec::len).sum(),
            _ => 0,
        }
    }

    /// Distance in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    /// Duration in minutes.
    pub fn duration_min(&self) -> f64 {
        self.duration / 60.0
    }
}

/// A waypoint snapped to the road network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    /// Street name, empty if unnamed.
    #[serde(default)]
    pub name: String,
    /// Snapped location as `[lon, lat]`.
    pub location: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_swaps_axis_order() {
        let request = RouteRequest::from_query(Some("12.34,56.78"), Some("11.11,22.22")).unwrap();
        assert_eq!(
            request.url("http://osrm.test"),
            "http://osrm.test/route/v1/driving/56.78,12.34;22.22,11.11?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn test_url_ignores_trailing_slash() {
        let request = RouteRequest::from_query(Some("1,2"), Some("3,4")).unwrap();
        assert_eq!(
            request.url("http://osrm.test/"),
            "http://osrm.test/route/v1/driving/2,1;4,3?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn test_coordinates_path() {
        let request = RouteRequest::from_query(Some("-1.5,30"), Some("2,-60.25")).unwrap();
        assert_eq!(request.coordinates_path(), "30,-1.5;-60.25,2");
    }

    #[test]
    fn test_from_query_missing() {
        for (origin, destination) in [
            (None, Some("1,2")),
            (Some("1,2"), None),
            (None, None),
            (Some(""), Some("1,2")),
            (Some("1,2"), Some("")),
        ] {
            let err = RouteRequest::from_query(origin, destination).unwrap_err();
            assert!(matches!(err, DirectionsError::MissingParameters));
        }
    }

    #[test]
    fn test_from_query_invalid() {
        let err = RouteRequest::from_query(Some("1,2"), Some("nope")).unwrap_err();
        assert!(matches!(err, DirectionsError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_response_deserialize() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 12500.0,
                "duration": 900.0,
                "weight": 900.0,
                "geometry": {"type": "LineString", "coordinates": [[13.38, 52.51], [13.39, 52.52], [13.40, 52.53]]}
            }],
            "waypoints": [{"name": "Unter den Linden", "location": [13.38, 52.51]}]
        }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.waypoints[0].name, "Unter den Linden");

        let route = response.best_route().unwrap();
        assert_eq!(route.point_count(), 3);
        assert_eq!(route.distance_km(), 12.5);
        assert_eq!(route.duration_min(), 15.0);
    }

    #[test]
    fn test_response_no_route() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_ok());
        assert!(response.best_route().is_none());
        assert_eq!(
            response.message.as_deref(),
            Some("Impossible route between points")
        );
    }
}
