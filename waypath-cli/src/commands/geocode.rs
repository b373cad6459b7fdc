use anyhow::{bail, Context, Result};
use serde::Serialize;
use waypath::{Geocoder, GeocoderConfig};

#[derive(Serialize)]
struct PlaceOutput {
    lat: f64,
    lon: f64,
    display_name: String,
}

pub async fn run(config: GeocoderConfig, address: &str, json: bool) -> Result<()> {
    let geocoder = Geocoder::new(config).context("Failed to create geocoder")?;

    let places = geocoder
        .search(address)
        .await
        .context("Could not geocode address")?;

    if json {
        let output = places
            .iter()
            .map(|place| {
                let coord = place.coordinate()?;
                Ok(PlaceOutput {
                    lat: coord.lat(),
                    lon: coord.lon(),
                    display_name: place.display_name.clone(),
                })
            })
            .collect::<waypath::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let Some(place) = places.first() else {
        bail!("No results found for: {}", address);
    };

    println!("{}", place.coordinate()?);
    if !place.display_name.is_empty() {
        println!("{}", place.display_name);
    }

    Ok(())
}
