mod crew;
mod ephemeris;
mod timefmt;
mod web;

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use crate::crew::CrewCache;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "space-backend")]
#[command(about = "ISS tracking HTTP API")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", cli.config, e);
            return ExitCode::FAILURE;
        }
    };

    // Fatal by design: without a resolved element set no endpoint can work.
    let model = match ephemeris::load_tracked_satellite(&config.satellite).await {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading elements feed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Tracking {} (NORAD {})", model.name(), model.norad_id());

    let crew = match CrewCache::new(&config.crew) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error building crew client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config, Arc::new(model), Arc::new(crew)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
