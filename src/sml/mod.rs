//! # SML Protocol Module
//!
//! Implementation of the meter's fixed-layout SML transmission format.
//!
//! This module handles:
//! - Frame synchronization on the raw byte stream (start-sequence hunt)
//! - Byte-stuffing removal in a single pass
//! - End-sequence and CRC16 validation
//! - Fixed-offset field extraction into [`protocol::Measurement`]

pub mod crc;
pub mod decoder;
pub mod frame;
pub mod protocol;
pub mod reader;

pub use protocol::Measurement;
pub use reader::SmlReader;
