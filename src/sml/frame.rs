//! # Raw Frame Buffer and Validation
//!
//! Holds one de-stuffed 404-byte SML transmission and checks its integrity.
//!
//! The buffer is allocated once per reader and reused in place across
//! frames; its content is only meaningful between a successful validation
//! and the next synchronization pass.

use tracing::debug;

use super::crc::crc16;
use super::protocol::{SML_CRC_OFFSET, SML_CRC_SPAN, SML_END_SEQ, SML_END_SEQ_START, SML_FRAME_LEN};

/// Fixed-size buffer for one de-stuffed SML transmission
#[derive(Debug)]
pub struct RawFrame {
    bytes: [u8; SML_FRAME_LEN],
}

impl RawFrame {
    /// Create a zeroed frame buffer
    pub fn new() -> Self {
        Self {
            bytes: [0u8; SML_FRAME_LEN],
        }
    }

    /// Frame contents as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable frame contents, for the synchronizer filling it in
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Check end sequence and CRC16 of the received frame
    ///
    /// Pure aside from diagnostic logging. A `false` is not an error: the
    /// caller discards the frame and resynchronizes on the byte stream.
    ///
    /// # Returns
    ///
    /// * `bool` - true if the frame carries the end sequence and a matching
    ///   checksum
    pub fn validate(&self) -> bool {
        let end = &self.bytes[SML_END_SEQ_START..SML_END_SEQ_START + SML_END_SEQ.len()];
        if end != SML_END_SEQ {
            debug!("Frame rejected: end sequence mismatch ({:02X?})", end);
            return false;
        }

        let embedded = u16::from_be_bytes([
            self.bytes[SML_CRC_OFFSET],
            self.bytes[SML_CRC_OFFSET + 1],
        ]);
        let computed = crc16(&self.bytes[SML_CRC_SPAN]);

        if computed != embedded {
            debug!(
                "Frame rejected: CRC mismatch (computed 0x{:04X}, embedded 0x{:04X})",
                computed, embedded
            );
            return false;
        }

        true
    }
}

impl Default for RawFrame {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{build_frame, frame_from_bytes, RawValues};
    use super::*;

    #[test]
    fn test_validate_accepts_well_formed_frame() {
        let frame = frame_from_bytes(build_frame(&RawValues::default()));
        assert!(frame.validate());
    }

    #[test]
    fn test_validate_rejects_zeroed_frame() {
        let frame = RawFrame::new();
        assert!(!frame.validate());
    }

    #[test]
    fn test_validate_rejects_end_sequence_mismatch() {
        let mut bytes = build_frame(&RawValues::default());
        bytes[SML_END_SEQ_START + 4] = 0x1B; // 0x1A is the terminator byte
        let frame = frame_from_bytes(bytes);
        assert!(!frame.validate());
    }

    #[test]
    fn test_validate_rejects_flipped_payload_bit() {
        let mut bytes = build_frame(&RawValues::default());
        bytes[200] ^= 0x01;
        let frame = frame_from_bytes(bytes);
        assert!(!frame.validate());
    }

    #[test]
    fn test_validate_rejects_corrupted_checksum() {
        let mut bytes = build_frame(&RawValues::default());
        bytes[SML_CRC_OFFSET] ^= 0xFF;
        let frame = frame_from_bytes(bytes);
        assert!(!frame.validate());
    }

    #[test]
    fn test_corruption_outside_crc_span_passes_validation() {
        // Bytes before the checksummed span are not integrity-protected
        let mut bytes = build_frame(&RawValues::default());
        bytes[20] ^= 0xFF;
        let frame = frame_from_bytes(bytes);
        assert!(frame.validate());
    }
}
