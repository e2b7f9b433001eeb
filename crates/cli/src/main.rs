mod args;
mod error;
mod geocode;
mod input;
mod pipeline;

use clap::Parser;
use std::process::ExitCode;
use tracing::{Level, error, info};

use crate::args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("Starting batch...");
    match pipeline::run(args.into()).await {
        Ok(summary) => {
            info!(
                "Geocoded {} of {} addresses, recorded {} new rows ({} total)",
                summary.geocoded, summary.selected, summary.recorded, summary.total
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
