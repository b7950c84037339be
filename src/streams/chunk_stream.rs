// In: src/streams/chunk_stream.rs

//! The buffering chunk encoder shared by the size and content streams.
//!
//! A `BufferingChunkEncoder<R>` collects chunks one at a time, applies the
//! discipline `R` to each, and packs them four at a time through
//! `kernels::chunk_codec` into the control and data outputs it was wired to at
//! construction. `finalize` flushes a partial group and hands both outputs back.

use std::marker::PhantomData;

use crate::kernels::{chunk_codec, zigzag};
use crate::streams::byte_stream::ByteStream;
use crate::traits::ChunkRepr;

//==================================================================================
// 1. Disciplines
//==================================================================================

/// Chunks are packed as-is. Only for values that are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Raw;

impl ChunkRepr for Raw {
    const NAME: &'static str = "raw";

    #[inline]
    fn to_wire(chunk: u32) -> u32 {
        chunk
    }

    #[inline]
    fn from_wire(wire: u32) -> u32 {
        wire
    }
}

/// Chunks are read as `i32` and zigzag-folded before packing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zigzag;

impl ChunkRepr for Zigzag {
    const NAME: &'static str = "zigzag";

    #[inline]
    fn to_wire(chunk: u32) -> u32 {
        zigzag::encode_chunk(chunk)
    }

    #[inline]
    fn from_wire(wire: u32) -> u32 {
        zigzag::decode_chunk(wire)
    }
}

//==================================================================================
// 2. The Buffering Encoder
//==================================================================================

/// The control and data substreams produced by one chunk stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChunkStreamOutput {
    pub control: ByteStream,
    pub data: ByteStream,
}

#[derive(Debug)]
pub struct BufferingChunkEncoder<R: ChunkRepr> {
    pending: [u32; chunk_codec::CHUNKS_PER_GROUP],
    pending_len: usize,
    chunk_count: u64,
    control: ByteStream,
    data: ByteStream,
    _repr: PhantomData<R>,
}

impl<R: ChunkRepr> BufferingChunkEncoder<R> {
    /// Wires the encoder to its two output sinks.
    pub fn new(control: ByteStream, data: ByteStream) -> Self {
        Self {
            pending: [0; chunk_codec::CHUNKS_PER_GROUP],
            pending_len: 0,
            chunk_count: 0,
            control,
            data,
            _repr: PhantomData,
        }
    }

    /// Buffers one chunk, emitting a full group once four are pending.
    #[inline]
    pub fn encode_chunk(&mut self, chunk: u32) {
        self.pending[self.pending_len] = R::to_wire(chunk);
        self.pending_len += 1;
        self.chunk_count += 1;
        if self.pending_len == chunk_codec::CHUNKS_PER_GROUP {
            self.flush_pending();
        }
    }

    /// Number of chunks submitted so far.
    pub fn chunk_count(&self) -> u64 {
        self.chunk_count
    }

    /// Number of chunks buffered but not yet packed.
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    /// Flushes any partial group and returns the two outputs.
    pub fn finalize(mut self) -> ChunkStreamOutput {
        if self.pending_len > 0 {
            self.flush_pending();
        }
        log::trace!(
            "{} chunk stream finalized: {} chunks, {} control bytes, {} data bytes",
            R::NAME,
            self.chunk_count,
            self.control.len(),
            self.data.len()
        );
        ChunkStreamOutput {
            control: self.control,
            data: self.data,
        }
    }

    fn flush_pending(&mut self) {
        chunk_codec::encode_group(
            &self.pending[..self.pending_len],
            self.control.vec_mut(),
            self.data.vec_mut(),
        );
        self.pending_len = 0;
    }
}

impl<R: ChunkRepr> Default for BufferingChunkEncoder<R> {
    fn default() -> Self {
        Self::new(ByteStream::new(), ByteStream::new())
    }
}

/// Recovers the chunks, as originally submitted, from a finalized output.
///
/// # Errors
/// Propagates `NimbleError::ChunkDecodeError` from the packing kernel.
pub fn decode_chunks<R: ChunkRepr>(
    control: &[u8],
    data: &[u8],
    count: usize,
) -> Result<Vec<u32>, crate::error::NimbleError> {
    let wire = chunk_codec::decode(control, data, count)?;
    Ok(wire.into_iter().map(R::from_wire).collect())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::IntoChunk;

    #[test]
    fn test_nothing_written_yields_empty_outputs() {
        let encoder = BufferingChunkEncoder::<Raw>::default();
        let output = encoder.finalize();
        assert!(output.control.is_empty());
        assert!(output.data.is_empty());
    }

    #[test]
    fn test_groups_are_emitted_eagerly() {
        let mut encoder = BufferingChunkEncoder::<Raw>::default();
        for value in [1, 2, 3] {
            encoder.encode_chunk(value);
        }
        assert_eq!(encoder.pending_len(), 3);
        encoder.encode_chunk(4);
        assert_eq!(encoder.pending_len(), 0);
        encoder.encode_chunk(5);
        assert_eq!(encoder.chunk_count(), 5);

        let output = encoder.finalize();
        assert_eq!(output.control.len(), 2);
        assert_eq!(output.data.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_outputs_are_appended_to_wired_sinks() {
        let mut control = ByteStream::new();
        control.push(0xAA);
        let mut encoder = BufferingChunkEncoder::<Raw>::new(control, ByteStream::new());
        encoder.encode_chunk(7);

        let output = encoder.finalize();
        assert_eq!(output.control.as_slice(), &[0xAA, 0b01]);
        assert_eq!(output.data.as_slice(), &[7]);
    }

    #[test]
    fn test_raw_roundtrip() {
        let original = vec![0u32, 3, 300, 70_000, u32::MAX];
        let mut encoder = BufferingChunkEncoder::<Raw>::default();
        for &value in &original {
            encoder.encode_chunk(value);
        }
        let output = encoder.finalize();
        let decoded =
            decode_chunks::<Raw>(output.control.as_slice(), output.data.as_slice(), original.len())
                .unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_zigzag_roundtrip_signed_extremes() {
        let original = [0i32, 1, -1, i32::MAX, i32::MIN];
        let mut encoder = BufferingChunkEncoder::<Zigzag>::default();
        for &value in &original {
            encoder.encode_chunk(value.into_chunk());
        }
        let output = encoder.finalize();
        let decoded = decode_chunks::<Zigzag>(
            output.control.as_slice(),
            output.data.as_slice(),
            original.len(),
        )
        .unwrap();

        let recovered: Vec<i32> = decoded.into_iter().map(bytemuck::cast).collect();
        assert_eq!(recovered, original);
    }

    #[test]
    fn test_zigzag_keeps_small_negatives_small() {
        let mut encoder = BufferingChunkEncoder::<Zigzag>::default();
        encoder.encode_chunk((-1i32).into_chunk());
        let output = encoder.finalize();
        // -1 folds to 1: one data byte instead of four.
        assert_eq!(output.data.as_slice(), &[1]);
    }
}
