use clap::Parser;
use std::{path::PathBuf, time::Duration};

use crate::geocode::DEFAULT_GEOCODE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "stopmatch",
    version,
    about = "Geocodes infraction addresses and matches them to the nearest route and stop",
    long_about = "Reads a CSV of infraction records, geocodes the addresses not yet present \
                  in the output file (one batch per run), matches every geocoded point to \
                  the closest route and then to the closest stop of that route, and appends \
                  the results to the output CSV."
)]
pub struct Args {
    /// Input CSV with one infraction per row
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory with one subdirectory of GeoJSON files per route
    #[arg(short, long)]
    pub routes: PathBuf,

    /// Cumulative output CSV, created when missing
    #[arg(short, long, default_value = "matches.csv")]
    pub output: PathBuf,

    /// Number of new addresses geocoded per run
    #[arg(short, long, default_value_t = 10)]
    pub batch_size: usize,

    /// HERE geocoding API key
    #[arg(long, env = "HERE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Text appended to every address before geocoding, e.g. ", Bogotá, Colombia"
    #[arg(long, default_value = "")]
    pub address_suffix: String,

    /// Case-insensitive substring identifying the address column
    #[arg(long, default_value = "direc")]
    pub address_column: String,

    /// Pause after every geocoding call, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Geocoding endpoint
    #[arg(long, default_value = DEFAULT_GEOCODE_URL)]
    pub geocode_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Also write routes, stops and matches of this run as GeoJSON
    #[arg(long)]
    pub map_output: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    pub verbose: bool,
}

pub struct Config {
    pub input: PathBuf,
    pub routes: PathBuf,
    pub output: PathBuf,
    pub batch_size: usize,
    pub api_key: String,
    pub address_suffix: String,
    pub address_column: String,
    pub delay: Duration,
    pub geocode_url: String,
    pub timeout: Duration,
    pub map_output: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            routes: args.routes,
            output: args.output,
            batch_size: args.batch_size,
            api_key: args.api_key,
            address_suffix: args.address_suffix,
            address_column: args.address_column,
            delay: Duration::from_millis(args.delay_ms),
            geocode_url: args.geocode_url,
            timeout: Duration::from_secs(args.timeout_secs),
            map_output: args.map_output,
        }
    }
}
