//! Shared render scratch buffer
//!
//! One process-wide buffer backs every queue sink: a render is written into
//! it from offset zero, then sent as a single message. The dispatch loop is
//! strictly sequential, so the mutex is uncontended; it is there so the
//! exclusivity survives if dispatch ever gains concurrency.

use std::io;
use std::sync::{Arc, Mutex};

use bytes::{Bytes, BytesMut};

/// Default capacity of the queue-sink render buffer (256 KiB)
pub const DEFAULT_SCRATCH_CAPACITY: usize = 256 * 1024;

/// Fixed-capacity render buffer
///
/// Writing past the capacity fails the render instead of growing, which
/// bounds the size of any queue message.
pub struct ScratchBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl ScratchBuffer {
    /// Create a buffer with the given capacity in bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Discard previous content; the next write starts at offset zero
    pub fn rewind(&mut self) {
        self.buf.clear();
    }

    /// Bytes rendered since the last rewind
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether anything has been rendered since the last rewind
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy the rendered bytes out as a message payload
    pub fn message(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }
}

impl io::Write for ScratchBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > self.capacity {
            return Err(io::Error::other("render exceeds scratch buffer capacity"));
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handle to the buffer shared by all queue sinks
pub type SharedScratch = Arc<Mutex<ScratchBuffer>>;

/// Allocate the process-wide scratch buffer
pub fn shared_scratch(capacity: usize) -> SharedScratch {
    Arc::new(Mutex::new(ScratchBuffer::with_capacity(capacity)))
}
