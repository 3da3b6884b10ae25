//! # Field Decoder
//!
//! Extracts the measurement fields from a validated frame.
//!
//! Decoding is total: the synchronizer only hands over frames that passed
//! validation, so every read here is a fixed-offset slice of a 404-byte
//! buffer and cannot fail.

use chrono::Utc;

use super::frame::RawFrame;
use super::protocol::{
    FieldLayout, FieldWidth, Measurement, FIELD_ENERGY_COUNT, FIELD_POWER, FIELD_POWER_L1,
    FIELD_POWER_L2, FIELD_POWER_L3, FIELD_SECONDS_INDEX, FIELD_VOLTAGE_L1, FIELD_VOLTAGE_L2,
    FIELD_VOLTAGE_L3,
};

/// Read a field's raw big-endian integer from the frame
fn read_raw(frame: &[u8], field: &FieldLayout) -> i64 {
    let at = field.offset;
    match field.width {
        FieldWidth::U16 => u16::from_be_bytes([frame[at], frame[at + 1]]) as i64,
        FieldWidth::U32 => {
            u32::from_be_bytes([frame[at], frame[at + 1], frame[at + 2], frame[at + 3]]) as i64
        }
        FieldWidth::I64 => i64::from_be_bytes([
            frame[at],
            frame[at + 1],
            frame[at + 2],
            frame[at + 3],
            frame[at + 4],
            frame[at + 5],
            frame[at + 6],
            frame[at + 7],
        ]),
    }
}

/// Read a field and apply its unit scaling
fn read_scaled(frame: &[u8], field: &FieldLayout) -> f64 {
    read_raw(frame, field) as f64 / field.divisor
}

/// Decode a validated frame into a [`Measurement`]
///
/// The timestamp is captured from the wall clock at decode time; the frame
/// itself only carries the meter's monotonic seconds counter.
pub fn decode(frame: &RawFrame) -> Measurement {
    let bytes = frame.as_bytes();

    Measurement {
        energy_count: read_scaled(bytes, &FIELD_ENERGY_COUNT),
        power: read_scaled(bytes, &FIELD_POWER),
        power_l1: read_scaled(bytes, &FIELD_POWER_L1),
        power_l2: read_scaled(bytes, &FIELD_POWER_L2),
        power_l3: read_scaled(bytes, &FIELD_POWER_L3),
        voltage_l1: read_scaled(bytes, &FIELD_VOLTAGE_L1),
        voltage_l2: read_scaled(bytes, &FIELD_VOLTAGE_L2),
        voltage_l3: read_scaled(bytes, &FIELD_VOLTAGE_L3),
        seconds_index: read_raw(bytes, &FIELD_SECONDS_INDEX) as u32,
        timestamp: Utc::now(),
    }
}
