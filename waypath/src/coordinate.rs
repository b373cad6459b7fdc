//! Coordinate parsing and axis-order conversion.
//!
//! Callers supply points as `"<latitude>,<longitude>"`. OSRM expects the
//! opposite axis order, `"<longitude>,<latitude>"`.
//!
//! The textual components are kept as given (after trimming surrounding
//! whitespace), so `"12.340,56.78"` is forwarded as `"56.78,12.340"` and not
//! reformatted through `f64`.

use std::fmt;
use std::str::FromStr;

use crate::error::DirectionsError;

/// A point supplied as `lat,lon`.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
    lat_text: String,
    lon_text: String,
}

impl Coordinate {
    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Render in OSRM axis order.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypath::Coordinate;
    ///
    /// let coord: Coordinate = "12.34,56.78".parse().unwrap();
    /// assert_eq!(coord.to_lon_lat(), "56.78,12.34");
    /// ```
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.lon_text, self.lat_text)
    }
}

impl FromStr for Coordinate {
    type Err = DirectionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DirectionsError::InvalidCoordinate {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.split(',');
        let (lat_text, lon_text) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat.trim(), lon.trim()),
            _ => return Err(invalid("expected exactly one comma (lat,lon)")),
        };

        let lat = parse_component(lat_text).ok_or_else(|| invalid("latitude is not a number"))?;
        let lon = parse_component(lon_text).ok_or_else(|| invalid("longitude is not a number"))?;

        Ok(Self {
            lat,
            lon,
            lat_text: lat_text.to_string(),
            lon_text: lon_text.to_string(),
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat_text, self.lon_text)
    }
}

/// `f64::from_str` accepts "NaN" and "inf"; neither is a coordinate.
fn parse_component(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
