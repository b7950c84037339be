// In: src/error.rs

//! This module defines the single, unified error type for the nimble encoder.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! The write-side API of the `Encoder` is total; errors only surface at the
//! edges: configuration loading, framing a stream whose length cannot be
//! represented in the header, and the inspection/decoding helpers.

use thiserror::Error;

use crate::frame::StreamKind;

#[derive(Error, Debug)]
pub enum NimbleError {
    // =========================================================================
    // === Semantic Errors
    // =========================================================================
    #[error("Invalid encoder configuration: {0}")]
    InvalidConfig(String),

    /// A stream grew past what a `u32` header field can describe.
    #[error("Stream '{stream}' is too large to frame: {len} bytes exceeds u32::MAX")]
    StreamTooLarge { stream: StreamKind, len: usize },

    /// A length or count handed to the size stream does not fit in a chunk.
    #[error("Length {0} does not fit in a 32-bit size chunk")]
    LengthOverflow(usize),

    #[error("Framed buffer is malformed: {0}")]
    FrameFormatError(String),

    #[error("Chunk stream decoding failed: {0}")]
    ChunkDecodeError(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error originating from the I/O subsystem (log files, `write_to` targets).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
