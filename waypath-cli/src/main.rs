use anyhow::Result;
use clap::{Parser, Subcommand};
use waypath::{GeocoderConfig, OsrmConfig};

mod commands;

/// OSRM driving directions CLI tool
#[derive(Parser)]
#[command(name = "waypath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OSRM server base URL
    #[arg(
        long,
        env = "WAYPATH_OSRM_URL",
        default_value = waypath::DEFAULT_OSRM_URL,
        global = true
    )]
    osrm_url: String,

    /// Nominatim server base URL, used to resolve addresses
    #[arg(
        long,
        env = "WAYPATH_NOMINATIM_URL",
        default_value = waypath::DEFAULT_NOMINATIM_URL,
        global = true
    )]
    nominatim_url: String,

    /// Request timeout in seconds (no timeout if unset)
    #[arg(short, long, env = "WAYPATH_OSRM_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a driving route between two points or addresses
    Route {
        /// Start point as lat,lon
        #[arg(
            long,
            allow_hyphen_values = true,
            required_unless_present = "from",
            conflicts_with = "from"
        )]
        origin: Option<String>,

        /// End point as lat,lon
        #[arg(
            long,
            allow_hyphen_values = true,
            required_unless_present = "to",
            conflicts_with = "to"
        )]
        destination: Option<String>,

        /// Start address, resolved through Nominatim
        #[arg(long)]
        from: Option<String>,

        /// End address, resolved through Nominatim
        #[arg(long)]
        to: Option<String>,

        /// Output a summary as JSON
        #[arg(short, long, conflicts_with = "raw")]
        json: bool,

        /// Output the routing service response unmodified
        #[arg(short, long)]
        raw: bool,
    },

    /// Resolve an address to lat,lon
    Geocode {
        /// Free-text address (e.g. "Brandenburger Tor, Berlin")
        address: String,

        /// Output all matches as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the routing service URL without sending the request
    Url {
        /// Start point as lat,lon
        #[arg(long, allow_hyphen_values = true)]
        origin: String,

        /// End point as lat,lon
        #[arg(long, allow_hyphen_values = true)]
        destination: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut osrm = OsrmConfig::new(cli.osrm_url);
    let mut geocoder = GeocoderConfig::new(cli.nominatim_url);
    if let Some(secs) = cli.timeout {
        osrm = osrm.with_timeout(secs);
        geocoder = geocoder.with_timeout(secs);
    }

    match cli.command {
        Commands::Route {
            origin,
            destination,
            from,
            to,
            json,
            raw,
        } => {
            let origin = commands::route::Endpoint::new(origin, from);
            let destination = commands::route::Endpoint::new(destination, to);
            commands::route::run(osrm, geocoder, origin, destination, json, raw).await
        }
        Commands::Geocode { address, json } => {
            commands::geocode::run(geocoder, &address, json).await
        }
        Commands::Url {
            origin,
            destination,
        } => commands::url::run(osrm, &origin, &destination),
    }
}
