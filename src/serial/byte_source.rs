//! Trait abstraction for the raw byte stream to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for the device yielding raw meter bytes
///
/// A return of `Ok(0)` means the device was closed; the reader treats it as
/// end-of-stream. Timeout policy lives behind this trait (the serial driver
/// blocks until data arrives), not in the frame logic.
#[async_trait]
pub trait ByteSource: Send {
    /// Read up to `buf.len()` bytes, blocking until at least one arrives
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Wrapper around tokio_serial::SerialStream that implements ByteSource
pub struct SerialByteSource {
    port: tokio_serial::SerialStream,
}

impl SerialByteSource {
    pub fn new(port: tokio_serial::SerialStream) -> Self {
        Self { port }
    }
}

#[async_trait]
impl ByteSource for SerialByteSource {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        use tokio::io::AsyncReadExt;
        self.port.read(buf).await
    }
}
