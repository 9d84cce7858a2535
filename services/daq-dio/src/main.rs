//! DAQ Digital-I/O Driver CLI
//!
//! Command-line interface for the DAQ digital-I/O ASCOM Alpaca driver.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;

use daq_dio::{load_config, Config, MockDaqLibrary, ServerBuilder};

#[derive(Parser)]
#[command(name = "daq-dio")]
#[command(about = "ASCOM Alpaca driver for MCC DAQ digital ports")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server port (overrides config file)
    #[arg(long)]
    server_port: Option<u16>,

    /// Index of the discovered DAQ device to bind (overrides config file)
    #[arg(long)]
    descriptor_index: Option<usize>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, server_port={:?}, descriptor_index={:?}, log_level={:?}",
        args.config,
        args.server_port,
        args.descriptor_index,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(server_port) = args.server_port {
        config.server.port = server_port;
    }
    if let Some(index) = args.descriptor_index {
        config.hardware.descriptor_index = index;
    }

    tracing::info!("Starting DAQ DIO driver");
    tracing::info!("Running in MOCK MODE - simulated DAQ hardware");
    tracing::info!("Port selection: {:?}", config.ports);
    tracing::info!("Server port: {}", config.server.port);

    let library = Arc::new(MockDaqLibrary::default());
    ServerBuilder::new(config, library)
        .build()
        .await?
        .start()
        .await?;

    Ok(())
}
