//! # SML Meter
//!
//! Reads measurements from an SML smart electricity meter over a serial IR
//! reading head and forwards them to InfluxDB.
//!
//! One measurement arrives per second. Corrupt transmissions cost latency
//! only: the reader resynchronizes on the byte stream and the loop never
//! sees them. A failed device read or a rejected InfluxDB write ends the
//! run, retry policy belongs to the service supervisor.

use anyhow::Result;
use tracing::{debug, info, warn};

mod config;
mod daily;
mod error;
mod serial;
mod sink;
mod sml;

use config::Config;
use daily::DailyTracker;
use sink::InfluxSink;
use sml::SmlReader;

/// Number of measurements between status log messages (~15 min at 1 Hz)
const LOG_INTERVAL_MEASUREMENTS: u64 = 900;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("SML meter v{} starting...", env!("CARGO_PKG_VERSION"));

    // Optional config file path as the only CLI argument
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => {
            warn!("No config file given, using defaults");
            Config::default()
        }
    };

    let source = serial::open(
        &config.serial.device,
        config.serial.baud_rate,
        config.serial.timeout_ms,
    )?;
    let mut reader = SmlReader::new(source);

    let sink = config.influx.enabled.then(|| {
        InfluxSink::new(
            &config.influx.url,
            &config.influx.database,
            &config.influx.measurement,
        )
    });
    let mut daily = config.daily.enabled.then(DailyTracker::new);

    info!("Reading measurements from {}", config.serial.device);
    info!("Press Ctrl+C to exit");

    let mut measurement_count: u64 = 0;

    loop {
        tokio::select! {
            result = reader.next_measurement() => {
                let measurement = result?;
                measurement_count += 1;
                debug!(
                    "Measurement: {:.2} W, {:.7} kWh (seconds index {})",
                    measurement.power, measurement.energy_count, measurement.seconds_index
                );

                if let Some(sink) = &sink {
                    sink.write(&measurement).await?;
                }

                if let Some(daily) = &mut daily {
                    daily.update(&measurement);
                }

                if measurement_count % LOG_INTERVAL_MEASUREMENTS == 0 {
                    info!(
                        "Processed {} measurements, current power {:.2} W",
                        measurement_count, measurement.power
                    );
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total measurements processed: {}", measurement_count);
                break;
            }
        }
    }

    Ok(())
}
