use anyhow::{Context, Result};
use waypath::{OsrmConfig, RouteRequest};

pub fn run(config: OsrmConfig, origin: &str, destination: &str) -> Result<()> {
    let request = RouteRequest::from_query(Some(origin), Some(destination))
        .context("Invalid coordinates")?;

    println!("{}", request.url(&config.base_url));

    Ok(())
}
