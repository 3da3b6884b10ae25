//! # Frame Synchronizer and Reader
//!
//! Recovers framing on the noisy meter byte stream and yields decoded
//! measurements.
//!
//! The reader hunts for the start sequence one byte at a time, accumulates
//! the fixed-length frame while removing byte stuffing in a single pass,
//! reads the trailer, and validates. A corrupt candidate frame is discarded
//! and synchronization restarts from scratch — the stream offers no
//! secondary framing guarantee that would support partial recovery. Only a
//! byte-source failure ends the loop.

use tracing::{debug, trace};

use crate::error::{Result, SmlMeterError};
use crate::serial::ByteSource;

use super::decoder::decode;
use super::frame::RawFrame;
use super::protocol::{
    Measurement, SML_ESCAPE_BYTE, SML_ESCAPE_RUN, SML_FRAME_LEN, SML_PAYLOAD_START, SML_START_SEQ,
    SML_TRAILER_START,
};

/// Size of the chunk buffer filled per device read
const READ_LEN: usize = 255;

/// Reads validated measurements from an SML byte stream
///
/// Owns one frame buffer and one chunk cursor for its whole lifetime; no
/// per-frame allocation. One reader serves one device; independent readers
/// share no state.
pub struct SmlReader<S: ByteSource> {
    source: S,
    frame: RawFrame,
    read_buf: [u8; READ_LEN],
    next: usize,
    len: usize,
}

impl<S: ByteSource> SmlReader<S> {
    /// Create a reader over a byte source
    pub fn new(source: S) -> Self {
        Self {
            source,
            frame: RawFrame::new(),
            read_buf: [0u8; READ_LEN],
            next: 0,
            len: 0,
        }
    }

    /// Block until the next valid frame arrives and decode it
    ///
    /// Corrupt candidate frames are skipped silently (logged at debug
    /// level); any number of them may pass before a measurement emerges.
    ///
    /// # Errors
    ///
    /// * [`SmlMeterError::Disconnected`] - the device reported end-of-stream
    /// * [`SmlMeterError::Io`] - a device read failed
    pub async fn next_measurement(&mut self) -> Result<Measurement> {
        self.read_frame().await?;
        Ok(decode(&self.frame))
    }

    /// Fill the frame buffer with the next transmission that validates
    async fn read_frame(&mut self) -> Result<()> {
        loop {
            self.hunt_start().await?;
            self.accumulate_payload().await?;
            self.read_trailer().await?;

            if self.frame.validate() {
                trace!("Received valid frame");
                return Ok(());
            }
            debug!("Discarding corrupt frame, resynchronizing");
        }
    }

    /// Wait for the 8-byte start sequence, writing it into the frame
    ///
    /// Any byte that breaks the prefix resets the match counter to zero;
    /// the mismatching byte itself is consumed.
    async fn hunt_start(&mut self) -> Result<()> {
        let mut matched = 0;

        while matched < SML_START_SEQ.len() {
            let byte = self.read_byte().await?;
            if byte == SML_START_SEQ[matched] {
                self.frame.as_bytes_mut()[matched] = byte;
                matched += 1;
            } else {
                matched = 0;
            }
        }

        Ok(())
    }

    /// Fill bytes [8, 396) while collapsing stuffed escape sequences
    ///
    /// A run of exactly 8 consecutive escape bytes is one stuffed escape
    /// marker: rewind the write position by 4 and reset the run counter.
    /// Any other run length passes through untouched.
    async fn accumulate_payload(&mut self) -> Result<()> {
        let mut pos = SML_PAYLOAD_START;
        let mut escape_run: u32 = 0;

        while pos < SML_TRAILER_START {
            let byte = self.read_byte().await?;
            self.frame.as_bytes_mut()[pos] = byte;

            if byte == SML_ESCAPE_BYTE {
                escape_run += 1;
                if escape_run == SML_ESCAPE_RUN {
                    pos -= 4;
                    escape_run = 0;
                }
            } else {
                escape_run = 0;
            }

            pos += 1;
        }

        Ok(())
    }

    /// Fill the remaining trailer bytes, no de-stuffing here
    async fn read_trailer(&mut self) -> Result<()> {
        for pos in SML_TRAILER_START..SML_FRAME_LEN {
            let byte = self.read_byte().await?;
            self.frame.as_bytes_mut()[pos] = byte;
        }

        Ok(())
    }

    /// Yield the next byte from the cursor, refilling it from the device
    async fn read_byte(&mut self) -> Result<u8> {
        while self.len == 0 {
            let n = self.source.read(&mut self.read_buf).await?;
            if n == 0 {
                return Err(SmlMeterError::Disconnected);
            }
            self.len = n;
            self.next = 0;
        }

        let byte = self.read_buf[self.next];
        self.next += 1;
        self.len -= 1;
        Ok(byte)
    }
}
