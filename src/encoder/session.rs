// In: src/encoder/session.rs

use crate::config::{EncoderConfig, FrameLayout};
use crate::error::NimbleError;
use crate::frame::{self, FrameAssembler, FramedBuffer, StreamKind, StreamSet};
use crate::streams::{BufferingChunkEncoder, ByteStream, FieldAppender, Raw, Zigzag};
use crate::traits::{IntoChunk, WriteSink};

//==================================================================================
// 1. The Encoder
//==================================================================================

/// One encoding session: routes writes into six streams and frames them once.
///
/// The encoder is single-threaded and owns every stream it writes to.
/// `finalize` consumes it, so writes after finalization and double
/// finalization do not compile.
#[derive(Debug)]
pub struct Encoder {
    field_data: FieldAppender,
    // Sizes are never negative, so they are not zigzagged.
    size_stream: BufferingChunkEncoder<Raw>,
    // Content may contain negatives.
    content_stream: BufferingChunkEncoder<Zigzag>,
    // Strings and binary go out as raw bytes.
    binary_data: ByteStream,
    layout: FrameLayout,
    log_stream_sizes: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Creates an encoder with the default configuration.
    pub fn new() -> Self {
        Self {
            field_data: FieldAppender::default(),
            size_stream: BufferingChunkEncoder::default(),
            content_stream: BufferingChunkEncoder::default(),
            binary_data: ByteStream::new(),
            layout: FrameLayout::default(),
            log_stream_sizes: false,
        }
    }

    /// Creates an encoder tuned by `config`.
    ///
    /// # Errors
    /// Returns `NimbleError::InvalidConfig` if `config` fails validation.
    pub fn with_config(config: &EncoderConfig) -> Result<Self, NimbleError> {
        config.validate()?;
        let capacity = config.stream_capacity_hint;
        Ok(Self {
            field_data: FieldAppender::with_page_size(config.field_page_size)?,
            size_stream: BufferingChunkEncoder::new(
                ByteStream::with_capacity(capacity),
                ByteStream::with_capacity(capacity),
            ),
            content_stream: BufferingChunkEncoder::new(
                ByteStream::with_capacity(capacity),
                ByteStream::with_capacity(capacity),
            ),
            binary_data: ByteStream::with_capacity(capacity),
            layout: config.layout,
            log_stream_sizes: config.log_stream_sizes,
        })
    }

    /// Forwards a size (length or count) chunk to the raw chunk stream.
    #[inline]
    pub fn encode_size_chunk(&mut self, chunk: u32) {
        self.size_stream.encode_chunk(chunk);
    }

    /// Forwards a content chunk to the zigzag chunk stream.
    #[inline]
    pub fn encode_content_chunk<C: IntoChunk>(&mut self, chunk: C) {
        self.content_stream.encode_chunk(chunk.into_chunk());
    }

    /// Appends string or binary bytes verbatim to the binary-data stream.
    #[inline]
    pub fn encode_binary(&mut self, bytes: &[u8]) {
        self.binary_data.append(bytes);
    }

    /// Appends serialized field bytes verbatim to the field-bytes stream.
    #[inline]
    pub fn encode_field_bytes(&mut self, bytes: &[u8]) {
        self.field_data.push(bytes);
    }

    /// Number of size and content chunks submitted so far.
    pub fn chunk_counts(&self) -> (u64, u64) {
        (self.size_stream.chunk_count(), self.content_stream.chunk_count())
    }

    /// Ends the session and frames all six streams with the configured layout.
    ///
    /// # Errors
    /// Returns `NimbleError::StreamTooLarge` if any stream exceeds what a `u32`
    /// length field can describe.
    pub fn finalize(self) -> Result<FramedBuffer, NimbleError> {
        let layout = self.layout;
        let log_stream_sizes = self.log_stream_sizes;
        let streams = self.drain();

        if log_stream_sizes {
            let lengths = streams.lengths();
            log_metric!(
                "event" = "finalize",
                "field_bytes" = lengths[StreamKind::FieldBytes.index()],
                "size_control" = lengths[StreamKind::SizeControl.index()],
                "size_data" = lengths[StreamKind::SizeData.index()],
                "content_control" = lengths[StreamKind::ContentControl.index()],
                "content_data" = lengths[StreamKind::ContentData.index()],
                "binary_data" = lengths[StreamKind::BinaryData.index()],
            );
        }

        let framed = frame::assemble(layout, streams)?;
        log::debug!("nimble frame finalized: {} bytes ({:?} layout)", framed.len(), layout);
        Ok(framed)
    }

    /// Ends the session and frames the streams with a caller-supplied assembler.
    pub fn finalize_with<A: FrameAssembler>(self, assembler: &A) -> Result<FramedBuffer, NimbleError> {
        assembler.assemble(self.drain())
    }

    /// Flushes both chunk streams and moves all six streams out.
    fn drain(self) -> StreamSet {
        let size = self.size_stream.finalize();
        let content = self.content_stream.finalize();

        let mut streams = StreamSet::new();
        streams.set(StreamKind::FieldBytes, self.field_data.into_bytes());
        streams.set(StreamKind::SizeControl, size.control.into_bytes());
        streams.set(StreamKind::SizeData, size.data.into_bytes());
        streams.set(StreamKind::ContentControl, content.control.into_bytes());
        streams.set(StreamKind::ContentData, content.data.into_bytes());
        streams.set(StreamKind::BinaryData, self.binary_data.into_bytes());
        streams
    }
}

//==================================================================================
// 2. Write Sink
//==================================================================================

impl WriteSink for Encoder {
    #[inline]
    fn encode_size_chunk(&mut self, chunk: u32) {
        Encoder::encode_size_chunk(self, chunk);
    }

    #[inline]
    fn encode_content_chunk<C: IntoChunk>(&mut self, chunk: C) {
        Encoder::encode_content_chunk(self, chunk);
    }

    #[inline]
    fn encode_binary(&mut self, bytes: &[u8]) {
        Encoder::encode_binary(self, bytes);
    }

    #[inline]
    fn encode_field_bytes(&mut self, bytes: &[u8]) {
        Encoder::encode_field_bytes(self, bytes);
    }
}
