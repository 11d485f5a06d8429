//! Roombook - room booking registry demo host
//!
//! Seeds a registry from a booking manifest (or the built-in demo) and
//! prints the occupancy of one day plus a set of availability checks.
//!
//! Usage: `roombook [config.toml]`

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roombook_core::{BookingManifest, BookingRegistry};

mod config;
mod demo;
mod report;

use config::{CliConfig, OutputFormat};
use report::Report;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match CliConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut registry = BookingRegistry::new();
    match &config.manifest {
        Some(path) => match BookingManifest::from_path(path) {
            Ok(manifest) => {
                let load = registry.load_manifest(&manifest);
                if !load.is_clean() {
                    tracing::warn!(
                        path = %path.display(),
                        rejected = load.rejected.len(),
                        "Manifest loaded with rejected entries"
                    );
                }
            }
            Err(e) => {
                tracing::error!("Failed to load manifest {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            if let Err(e) = demo::seed(&mut registry) {
                tracing::error!("Failed to seed demo bookings: {}", e);
                std::process::exit(1);
            }
        }
    }

    let checks: Vec<_> = config
        .checks
        .iter()
        .map(|check| check.to_request(config.report_date))
        .collect();
    let report = Report::build(&registry, config.report_date, &checks);

    match config.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        },
    }
}
