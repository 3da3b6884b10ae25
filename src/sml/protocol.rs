//! # SML Protocol Constants and Types
//!
//! Wire layout definitions for the meter's fixed-length SML transmission.
//!
//! The meter emits one 404-byte transmission per second. Byte positions
//! inside the de-stuffed frame are semantically fixed, so fields are
//! described by a declarative layout table instead of inline offsets —
//! a future firmware layout change only touches this file.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// De-stuffed SML frame length in bytes
pub const SML_FRAME_LEN: usize = 404;

/// SML escape byte (start/end sequences, byte stuffing)
pub const SML_ESCAPE_BYTE: u8 = 0x1B;

/// Second half of the start sequence (version 1)
pub const SML_VERSION_BYTE: u8 = 0x01;

/// Frame start sequence: 4 escape bytes followed by 4 version bytes
pub const SML_START_SEQ: [u8; 8] = [0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];

/// Frame end sequence located at [`SML_END_SEQ_START`]
pub const SML_END_SEQ: [u8; 5] = [0x1B, 0x1B, 0x1B, 0x1B, 0x1A];

/// Offset of the end sequence within the frame
pub const SML_END_SEQ_START: usize = 396;

/// Offset where payload accumulation starts (right after the start sequence)
pub const SML_PAYLOAD_START: usize = SML_START_SEQ.len();

/// Offset where the un-stuffed trailer begins
pub const SML_TRAILER_START: usize = SML_END_SEQ_START;

/// Span of the inner SML message covered by the checksum: [59, 365)
pub const SML_CRC_SPAN: std::ops::Range<usize> = 59..365;

/// Offset of the embedded big-endian CRC16 within the frame
pub const SML_CRC_OFFSET: usize = 366;

/// A run of exactly this many consecutive escape bytes in the payload is a
/// stuffed escape sequence and collapses to half its length
pub const SML_ESCAPE_RUN: u32 = 8;

/// Width of a raw field on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    /// Unsigned 16-bit big-endian
    U16,
    /// Unsigned 32-bit big-endian
    U32,
    /// Signed 64-bit big-endian
    I64,
}

/// One row of the meter's field layout: where a value sits in the frame and
/// how its raw integer scales into engineering units
#[derive(Debug, Clone, Copy)]
pub struct FieldLayout {
    /// Byte offset within the de-stuffed frame
    pub offset: usize,
    /// Raw integer width and signedness
    pub width: FieldWidth,
    /// Divisor applied to the raw integer
    pub divisor: f64,
}

/// Seconds-since-power-up counter, ×1
pub const FIELD_SECONDS_INDEX: FieldLayout = FieldLayout {
    offset: 104,
    width: FieldWidth::U32,
    divisor: 1.0,
};

/// Total energy count, raw ÷ 1e7 -> kWh
pub const FIELD_ENERGY_COUNT: FieldLayout = FieldLayout {
    offset: 168,
    width: FieldWidth::I64,
    divisor: 1e7,
};

/// Total active power, raw ÷ 100 -> W (signed, negative when feeding in)
pub const FIELD_POWER: FieldLayout = FieldLayout {
    offset: 192,
    width: FieldWidth::I64,
    divisor: 100.0,
};

/// Phase L1 active power, raw ÷ 100 -> W
pub const FIELD_POWER_L1: FieldLayout = FieldLayout {
    offset: 216,
    width: FieldWidth::I64,
    divisor: 100.0,
};

/// Phase L2 active power, raw ÷ 100 -> W
pub const FIELD_POWER_L2: FieldLayout = FieldLayout {
    offset: 240,
    width: FieldWidth::I64,
    divisor: 100.0,
};

/// Phase L3 active power, raw ÷ 100 -> W
pub const FIELD_POWER_L3: FieldLayout = FieldLayout {
    offset: 264,
    width: FieldWidth::I64,
    divisor: 100.0,
};

/// Phase L1 voltage, raw ÷ 10 -> V
pub const FIELD_VOLTAGE_L1: FieldLayout = FieldLayout {
    offset: 288,
    width: FieldWidth::U16,
    divisor: 10.0,
};

/// Phase L2 voltage, raw ÷ 10 -> V
pub const FIELD_VOLTAGE_L2: FieldLayout = FieldLayout {
    offset: 306,
    width: FieldWidth::U16,
    divisor: 10.0,
};

/// Phase L3 voltage, raw ÷ 10 -> V
pub const FIELD_VOLTAGE_L3: FieldLayout = FieldLayout {
    offset: 324,
    width: FieldWidth::U16,
    divisor: 10.0,
};

/// One decoded meter reading
///
/// Immutable once produced; the timestamp is captured at decode time since
/// the frame only carries the monotonic `seconds_index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Total energy count in kWh (7 decimal places of meter resolution)
    pub energy_count: f64,

    /// Total active power in W (signed)
    pub power: f64,

    /// Phase L1 active power in W
    pub power_l1: f64,

    /// Phase L2 active power in W
    pub power_l2: f64,

    /// Phase L3 active power in W
    pub power_l3: f64,

    /// Phase L1 voltage in V
    pub voltage_l1: f64,

    /// Phase L2 voltage in V
    pub voltage_l2: f64,

    /// Phase L3 voltage in V
    pub voltage_l3: f64,

    /// Meter's seconds-since-power-up counter
    pub seconds_index: u32,

    /// Wall-clock instant the frame was decoded
    pub timestamp: DateTime<Utc>,
}
