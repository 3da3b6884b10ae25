//! # SML Meter Library
//!
//! Read measurements from an SML smart electricity meter over a serial IR
//! reading head.
//!
//! The core is the frame synchronizer/validator/decoder in [`sml`]: it
//! recovers framing on a noisy byte stream, removes byte stuffing, checks
//! the CRC16 and extracts the fixed-offset measurement fields. The serial
//! transport, InfluxDB sink and daily-consumption bookkeeping are thin glue
//! around it.

pub mod config;
pub mod daily;
pub mod error;
pub mod serial;
pub mod sink;
pub mod sml;
