//! # Serial Communication Module
//!
//! Opens the serial line behind the meter's optical reading head.
//!
//! This module handles:
//! - Opening the serial port at 9600 baud, 8-N-1
//! - Asserting RTS to power the reading head
//! - Exposing the port as a [`ByteSource`] for the frame reader
//!
//! The line parameters are a deployment detail of the reference transport;
//! the frame reader only depends on the [`ByteSource`] read semantics.

use crate::error::{Result, SmlMeterError};
use std::time::Duration;
use tokio_serial::{SerialPort, SerialPortBuilderExt};
use tracing::{debug, info};

pub mod byte_source;

pub use byte_source::{ByteSource, SerialByteSource};

/// Baud rate of the meter's serial interface
pub const SML_BAUD_RATE: u32 = 9600;

/// Open the meter's serial device as a byte source
///
/// # Arguments
///
/// * `device` - Device path (e.g., "/dev/ttyAMA0")
/// * `baud_rate` - Line speed, 9600 for the reference transport
/// * `timeout_ms` - Driver read timeout in milliseconds
///
/// # Errors
///
/// Returns [`SmlMeterError::Serial`] if the device cannot be opened or RTS
/// cannot be asserted
pub fn open(device: &str, baud_rate: u32, timeout_ms: u64) -> Result<SerialByteSource> {
    debug!("Opening serial port: {}", device);

    let mut port = tokio_serial::new(device, baud_rate)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .timeout(Duration::from_millis(timeout_ms))
        .open_native_async()
        .map_err(|e| SmlMeterError::Serial(format!("Failed to open {}: {}", device, e)))?;

    // The optical reading head draws its power from RTS
    port.write_request_to_send(true)
        .map_err(|e| SmlMeterError::Serial(format!("Failed to assert RTS on {}: {}", device, e)))?;

    info!("Opened meter device at {} ({} baud, 8-N-1)", device, baud_rate);
    Ok(SerialByteSource::new(port))
}
