//! # Error Types
//!
//! Custom error types for the SML meter reader using `thiserror`.
//!
//! Frame corruption (bad end marker, CRC mismatch) is deliberately *not* an
//! error here: line noise is expected on the optical link and the reader
//! resynchronizes silently. Only byte-source failures and sink/config
//! problems surface as errors.

use thiserror::Error;

/// Main error type for the SML meter reader
#[derive(Debug, Error)]
pub enum SmlMeterError {
    /// Serial port errors (open, configuration)
    #[error("Serial port error: {0}")]
    Serial(String),

    /// The byte source reported end-of-stream (device closed)
    #[error("Byte source disconnected")]
    Disconnected,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Measurement sink errors (InfluxDB write failed)
    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type alias for the SML meter reader
pub type Result<T> = std::result::Result<T, SmlMeterError>;
