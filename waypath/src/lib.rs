//! # waypath - OSRM driving directions
//!
//! Small library for asking an [OSRM](https://project-osrm.org/) server for a
//! driving route between two points given in the usual `lat,lon` notation.
//!
//! ## Features
//!
//! - **Strict parsing**: `lat,lon` strings are checked for exactly one comma
//!   and numeric components before anything goes over the wire
//! - **Axis order**: coordinates are swapped to the `lon,lat` order OSRM expects
//! - **Verbatim relay**: [`OsrmClient::fetch_route`] returns the upstream JSON
//!   byte for byte
//! - **Geocoding**: [`Geocoder`] resolves free-text addresses through Nominatim
//!
//! ## Quick Start
//!
//! ```ignore
//! use waypath::{OsrmClient, OsrmConfig, RouteRequest};
//!
//! let client = OsrmClient::new(OsrmConfig::from_env())?;
//! let request = RouteRequest::from_query(Some("52.517,13.389"), Some("52.529,13.397"))?;
//!
//! // http://router.project-osrm.org/route/v1/driving/13.389,52.517;13.397,52.529?overview=full&geometries=geojson
//! println!("{}", client.route_url(&request));
//!
//! let route = client.fetch_route_summary(&request).await?;
//! ```

pub mod coordinate;
pub mod error;
pub mod geocode;
pub mod osrm;
pub mod route;

// Re-export main types at crate root for convenience
pub use coordinate::Coordinate;
pub use error::{DirectionsError, Result};
pub use geocode::{Geocoder, GeocoderConfig, Place, DEFAULT_NOMINATIM_URL};
pub use osrm::{OsrmClient, OsrmConfig, DEFAULT_OSRM_URL};
pub use route::{Route, RouteRequest, RouteResponse, Waypoint};
