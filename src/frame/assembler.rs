// In: src/frame/assembler.rs

//! Turns the six drained streams into a `FramedBuffer`.
//!
//! The assembler runs exactly once per session, inside `Encoder::finalize`.
//! Writers never see it, so the container layout can change here without any
//! change to the write-side API.

use std::io::Write;

use crate::config::FrameLayout;
use crate::error::NimbleError;
use crate::frame::format::{FrameHeader, StreamKind, HEADER_LEN, STREAM_COUNT};

//==================================================================================
// I. Drained Streams
//==================================================================================

/// The owned bytes of all six streams, indexed by `StreamKind`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamSet {
    streams: [Vec<u8>; STREAM_COUNT],
}

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: StreamKind, bytes: Vec<u8>) {
        self.streams[kind.index()] = bytes;
    }

    pub fn get(&self, kind: StreamKind) -> &[u8] {
        &self.streams[kind.index()]
    }

    /// Moves one stream out, leaving an empty buffer in its place.
    pub fn take(&mut self, kind: StreamKind) -> Vec<u8> {
        std::mem::take(&mut self.streams[kind.index()])
    }

    /// Byte length of every stream, in frame order.
    pub fn lengths(&self) -> [usize; STREAM_COUNT] {
        let mut lengths = [0usize; STREAM_COUNT];
        for kind in StreamKind::ALL {
            lengths[kind.index()] = self.streams[kind.index()].len();
        }
        lengths
    }
}

//==================================================================================
// II. Framed Buffer
//==================================================================================

/// The finished output of one encoding session: a header followed by the
/// non-empty stream segments, each segment owned separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedBuffer {
    header: FrameHeader,
    header_bytes: [u8; HEADER_LEN],
    segments: Vec<(StreamKind, Vec<u8>)>,
}

impl FramedBuffer {
    fn from_parts(header: FrameHeader, segments: Vec<(StreamKind, Vec<u8>)>) -> Self {
        debug_assert!(segments
            .iter()
            .all(|(kind, bytes)| !bytes.is_empty() && header.length(*kind) as usize == bytes.len()));
        Self {
            header_bytes: header.encode_le(),
            header,
            segments,
        }
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Total size in bytes, header included.
    pub fn len(&self) -> usize {
        HEADER_LEN + self.segments.iter().map(|(_, bytes)| bytes.len()).sum::<usize>()
    }

    /// Always false: a framed buffer carries at least its header.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The bytes of one stream; empty if that stream was never written.
    pub fn segment(&self, kind: StreamKind) -> &[u8] {
        self.segments
            .iter()
            .find(|(segment_kind, _)| *segment_kind == kind)
            .map(|(_, bytes)| bytes.as_slice())
            .unwrap_or(&[])
    }

    /// Streams that contributed bytes, in frame order.
    pub fn present_streams(&self) -> impl Iterator<Item = StreamKind> + '_ {
        self.segments.iter().map(|(kind, _)| *kind)
    }

    /// Every buffer of the chain, header first.
    pub fn chain(&self) -> impl Iterator<Item = &[u8]> + '_ {
        std::iter::once(&self.header_bytes[..]).chain(self.segments.iter().map(|(_, bytes)| bytes.as_slice()))
    }

    /// Copies the chain into one contiguous buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for part in self.chain() {
            out.extend_from_slice(part);
        }
        out
    }

    /// Consumes the buffer and coalesces the chain into one allocation.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.header_bytes);
        for (_, bytes) in self.segments {
            out.extend_from_slice(&bytes);
        }
        out
    }

    /// Writes the chain to `writer` without coalescing it first.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), NimbleError> {
        for part in self.chain() {
            writer.write_all(part)?;
        }
        Ok(())
    }
}

//==================================================================================
// III. Assemblers
//==================================================================================

/// Lays out drained streams as a framed buffer.
pub trait FrameAssembler {
    fn assemble(&self, streams: StreamSet) -> Result<FramedBuffer, NimbleError>;
}

/// Header of six lengths, then every non-empty stream in `StreamKind::ALL` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContiguousLayout;

impl FrameAssembler for ContiguousLayout {
    fn assemble(&self, mut streams: StreamSet) -> Result<FramedBuffer, NimbleError> {
        let header = FrameHeader::from_lengths(streams.lengths())?;

        let mut segments = Vec::with_capacity(STREAM_COUNT);
        for kind in StreamKind::ALL {
            let bytes = streams.take(kind);
            // An untouched stream is a zero in the header and nothing else.
            if !bytes.is_empty() {
                segments.push((kind, bytes));
            }
        }

        Ok(FramedBuffer::from_parts(header, segments))
    }
}

/// Runs the assembler selected by `layout`.
pub fn assemble(layout: FrameLayout, streams: StreamSet) -> Result<FramedBuffer, NimbleError> {
    match layout {
        FrameLayout::Contiguous => ContiguousLayout.assemble(streams),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_streams() -> StreamSet {
        let mut streams = StreamSet::new();
        streams.set(StreamKind::BinaryData, b"xyz".to_vec());
        streams.set(StreamKind::FieldBytes, b"ab".to_vec());
        streams.set(StreamKind::SizeData, vec![3]);
        streams
    }

    #[test]
    fn test_contiguous_layout_orders_segments() {
        let framed = ContiguousLayout.assemble(sample_streams()).unwrap();
        let order: Vec<StreamKind> = framed.present_streams().collect();
        assert_eq!(
            order,
            vec![StreamKind::FieldBytes, StreamKind::SizeData, StreamKind::BinaryData]
        );
        assert_eq!(framed.header().lengths(), [2, 0, 1, 0, 0, 3]);
        assert_eq!(framed.len(), 24 + 6);
    }

    #[test]
    fn test_empty_set_is_header_only() {
        let framed = ContiguousLayout.assemble(StreamSet::new()).unwrap();
        assert_eq!(framed.len(), HEADER_LEN);
        assert_eq!(framed.chain().count(), 1);
        assert_eq!(framed.into_bytes(), vec![0u8; HEADER_LEN]);
    }

    #[test]
    fn test_to_bytes_into_bytes_and_write_to_agree() {
        let framed = ContiguousLayout.assemble(sample_streams()).unwrap();
        let copied = framed.to_bytes();

        let mut written = Vec::new();
        framed.write_to(&mut written).unwrap();

        assert_eq!(copied, written);
        assert_eq!(&copied[24..], b"ab\x03xyz");
        assert_eq!(framed.into_bytes(), copied);
    }

    #[test]
    fn test_segment_lookup_for_absent_stream() {
        let framed = ContiguousLayout.assemble(sample_streams()).unwrap();
        assert!(framed.segment(StreamKind::ContentControl).is_empty());
        assert_eq!(framed.segment(StreamKind::FieldBytes), b"ab");
    }
}
