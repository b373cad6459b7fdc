use anyhow::{bail, Context, Result};
use serde::Serialize;
use waypath::{
    Coordinate, DirectionsError, Geocoder, GeocoderConfig, OsrmClient, OsrmConfig, RouteRequest,
};

#[derive(Serialize)]
struct RouteSummary {
    origin: String,
    destination: String,
    code: String,
    distance_km: Option<f64>,
    duration_min: Option<f64>,
    points: usize,
}

/// A route end given either as `lat,lon` or as a free-text address.
pub enum Endpoint {
    Coordinates(String),
    Address(String),
}

impl Endpoint {
    /// Coordinates take precedence; clap rejects supplying both.
    pub fn new(coordinates: Option<String>, address: Option<String>) -> Self {
        match (coordinates, address) {
            (Some(coordinates), _) => Endpoint::Coordinates(coordinates),
            (None, Some(address)) => Endpoint::Address(address),
            (None, None) => Endpoint::Coordinates(String::new()),
        }
    }

    async fn resolve(&self, geocoder: &Geocoder) -> waypath::Result<Coordinate> {
        match self {
            Endpoint::Coordinates(text) if text.is_empty() => {
                Err(DirectionsError::MissingParameters)
            }
            Endpoint::Coordinates(text) => text.parse(),
            Endpoint::Address(address) => geocoder.lookup(address).await,
        }
    }
}

pub async fn run(
    config: OsrmConfig,
    geocoder_config: GeocoderConfig,
    origin: Endpoint,
    destination: Endpoint,
    json: bool,
    raw: bool,
) -> Result<()> {
    let geocoder = Geocoder::new(geocoder_config).context("Failed to create geocoder")?;

    let origin = origin
        .resolve(&geocoder)
        .await
        .context("Could not resolve origin")?;
    let destination = destination
        .resolve(&geocoder)
        .await
        .context("Could not resolve destination")?;
    let request = RouteRequest::new(origin, destination);

    let client = OsrmClient::new(config).context("Failed to create OSRM client")?;

    if raw {
        let body = client
            .fetch_route(&request)
            .await
            .context("Could not fetch directions")?;
        println!("{}", body.get());
        return Ok(());
    }

    let response = client
        .fetch_route_summary(&request)
        .await
        .context("Could not fetch directions")?;

    let route = response.best_route();

    // Output result
    if json {
        let summary = RouteSummary {
            origin: request.origin.to_string(),
            destination: request.destination.to_string(),
            code: response.code.clone(),
            distance_km: route.map(|r| r.distance_km()),
            duration_min: route.map(|r| r.duration_min()),
            points: route.map(|r| r.point_count()).unwrap_or(0),
        };
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    if !response.is_ok() {
        bail!(
            "Routing service returned {}: {}",
            response.code,
            response.message.as_deref().unwrap_or("no message")
        );
    }

    match route {
        Some(route) => {
            println!("Distance: {:.2} km", route.distance_km());
            println!("Duration: {:.1} min", route.duration_min());
            println!("Points:   {}", route.point_count());
        }
        None => println!("no route"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_geocoder() -> Geocoder {
        Geocoder::new(GeocoderConfig::new("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn test_endpoint_prefers_coordinates() {
        let endpoint = Endpoint::new(Some("1,2".to_string()), None);
        assert!(matches!(endpoint, Endpoint::Coordinates(ref c) if c == "1,2"));

        let endpoint = Endpoint::new(None, Some("Berlin".to_string()));
        assert!(matches!(endpoint, Endpoint::Address(ref a) if a == "Berlin"));
    }

    #[tokio::test]
    async fn test_resolve_coordinates_without_geocoder() {
        let endpoint = Endpoint::new(Some("12.34,56.78".to_string()), None);
        let coord = endpoint.resolve(&offline_geocoder()).await.unwrap();
        assert_eq!(coord.to_lon_lat(), "56.78,12.34");
    }

    #[tokio::test]
    async fn test_resolve_missing_and_invalid() {
        let err = Endpoint::new(None, None)
            .resolve(&offline_geocoder())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectionsError::MissingParameters));

        let err = Endpoint::new(Some("north".to_string()), None)
            .resolve(&offline_geocoder())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectionsError::InvalidCoordinate { .. }));
    }
}
