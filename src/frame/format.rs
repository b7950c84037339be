// In: src/frame/format.rs

//! Defines the wire-level constants and header of the nimble framed buffer.
//! This is the single source of truth for stream order and header layout.
//!
//! ```text
//! offset 0:  u32 fieldBytesLength
//! offset 4:  u32 sizeControlLength
//! offset 8:  u32 sizeDataLength
//! offset 12: u32 contentControlLength
//! offset 16: u32 contentDataLength
//! offset 20: u32 binaryDataLength
//! offset 24: the six streams, back to back, in the same order
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NimbleError;

//==================================================================================
// I. Stream Identity
//==================================================================================

/// Number of logical streams per encoded value.
pub const STREAM_COUNT: usize = 6;

/// Fixed header size in bytes: one little-endian `u32` per stream.
pub const HEADER_LEN: usize = STREAM_COUNT * std::mem::size_of::<u32>();

/// The six logical streams, declared in frame order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    FieldBytes,
    SizeControl,
    SizeData,
    ContentControl,
    ContentData,
    BinaryData,
}

impl StreamKind {
    /// Every stream, in the order its segment appears in the frame.
    pub const ALL: [StreamKind; STREAM_COUNT] = [
        StreamKind::FieldBytes,
        StreamKind::SizeControl,
        StreamKind::SizeData,
        StreamKind::ContentControl,
        StreamKind::ContentData,
        StreamKind::BinaryData,
    ];

    /// Position of this stream in the header and in the segment order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Byte offset of this stream's length field inside the header.
    #[inline]
    pub const fn header_offset(self) -> usize {
        self.index() * std::mem::size_of::<u32>()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StreamKind::FieldBytes => "field_bytes",
            StreamKind::SizeControl => "size_control",
            StreamKind::SizeData => "size_data",
            StreamKind::ContentControl => "content_control",
            StreamKind::ContentData => "content_data",
            StreamKind::BinaryData => "binary_data",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//==================================================================================
// II. Header
//==================================================================================

/// The six stream lengths that prefix every framed buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameHeader {
    lengths: [u32; STREAM_COUNT],
}

impl FrameHeader {
    /// Builds a header from per-stream byte lengths given in frame order.
    ///
    /// # Errors
    /// Returns `NimbleError::StreamTooLarge` for the first length that does not
    /// fit in a `u32`.
    pub fn from_lengths(lengths: [usize; STREAM_COUNT]) -> Result<Self, NimbleError> {
        let mut header = FrameHeader::default();
        for kind in StreamKind::ALL {
            let len = lengths[kind.index()];
            header.lengths[kind.index()] = u32::try_from(len)
                .map_err(|_| NimbleError::StreamTooLarge { stream: kind, len })?;
        }
        Ok(header)
    }

    #[inline]
    pub fn length(&self, kind: StreamKind) -> u32 {
        self.lengths[kind.index()]
    }

    pub fn lengths(&self) -> [u32; STREAM_COUNT] {
        self.lengths
    }

    /// Total bytes of all segments following the header.
    pub fn body_len(&self) -> u64 {
        self.lengths.iter().map(|&len| u64::from(len)).sum()
    }

    /// Serializes the header into its fixed 24-byte little-endian form.
    pub fn encode_le(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        for kind in StreamKind::ALL {
            let at = kind.header_offset();
            out[at..at + 4].copy_from_slice(&self.length(kind).to_le_bytes());
        }
        out
    }

    /// Parses the first `HEADER_LEN` bytes of `bytes`.
    ///
    /// # Errors
    /// Returns `NimbleError::FrameFormatError` if fewer than `HEADER_LEN` bytes
    /// are available.
    pub fn decode_le(bytes: &[u8]) -> Result<Self, NimbleError> {
        let raw = bytes.get(..HEADER_LEN).ok_or_else(|| {
            NimbleError::FrameFormatError(format!(
                "header needs {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            ))
        })?;

        let mut header = FrameHeader::default();
        for kind in StreamKind::ALL {
            let at = kind.header_offset();
            let mut field = [0u8; 4];
            field.copy_from_slice(&raw[at..at + 4]);
            header.lengths[kind.index()] = u32::from_le_bytes(field);
        }
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_24_bytes() {
        assert_eq!(HEADER_LEN, 24);
        assert_eq!(FrameHeader::default().encode_le(), [0u8; 24]);
    }

    #[test]
    fn test_stream_order_and_offsets() {
        let offsets: Vec<usize> = StreamKind::ALL.iter().map(|k| k.header_offset()).collect();
        assert_eq!(offsets, vec![0, 4, 8, 12, 16, 20]);
        assert_eq!(StreamKind::ContentData.to_string(), "content_data");
    }

    #[test]
    fn test_encode_is_little_endian() {
        let header = FrameHeader::from_lengths([1, 0x0102, 0, 0, 0, 0x0A0B0C0D]).unwrap();
        let bytes = header.encode_le();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[0x02, 0x01, 0, 0]);
        assert_eq!(&bytes[20..24], &[0x0D, 0x0C, 0x0B, 0x0A]);
        assert_eq!(FrameHeader::decode_le(&bytes).unwrap(), header);
        assert_eq!(header.body_len(), 1 + 0x0102 + 0x0A0B0C0D);
    }

    #[test]
    fn test_decode_short_header_error() {
        let result = FrameHeader::decode_le(&[0u8; 23]);
        assert!(matches!(result, Err(NimbleError::FrameFormatError(_))));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_stream_is_reported() {
        let too_big = u32::MAX as usize + 1;
        let err = FrameHeader::from_lengths([0, 0, 0, 0, too_big, 0]).unwrap_err();
        match err {
            NimbleError::StreamTooLarge { stream, len } => {
                assert_eq!(stream, StreamKind::ContentData);
                assert_eq!(len, too_big);
            }
            other => panic!("Expected StreamTooLarge, got {:?}", other),
        }
    }
}
