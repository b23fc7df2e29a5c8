//! Meteobridge - Open-Meteo forecast bridge
//!
//! Headless runner: performs a startup refresh, then keeps the published
//! weather state fresh on a fixed interval until interrupted. With `--once`
//! it prints the state as JSON and exits, standing in for the consumers that
//! normally read the coordinator.

use std::sync::Arc;

use clap::Parser;
use log::info;

use meteobridge::cli::Cli;
use meteobridge::coordinator::WeatherCoordinator;
use meteobridge::data::OpenMeteoClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.to_config();
    let interval = config.refresh_interval;

    // One coordinator, constructed here and handed to every consumer
    let client = OpenMeteoClient::new(config);
    let coordinator = Arc::new(WeatherCoordinator::new(client));

    // Startup refresh blocks until done; failures are logged, never fatal
    let outcome = coordinator.refresh().await;
    info!(
        "startup refresh finished (hourly updated: {}, daily updated: {})",
        outcome.hourly_updated, outcome.daily_updated
    );

    if cli.once {
        let state = coordinator.state_snapshot().await;
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let handle = coordinator.spawn_refresh_loop(interval);
    info!("refresh loop running every {:?}", interval);

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    handle.shutdown().await;

    Ok(())
}
