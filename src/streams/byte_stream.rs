//! A single-owner, append-only byte buffer.
//!
//! `ByteStream` backs the binary-data stream and the control/data outputs of
//! both chunk streams. Ownership of the bytes leaves the stream only through
//! `into_bytes`, which consumes it.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteStream {
    buf: Vec<u8>,
}

impl ByteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends `bytes` verbatim.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Direct access for kernels that write into a `Vec<u8>`.
    pub(crate) fn vec_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    /// Consumes the stream and hands its bytes to the caller.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
