//! Read-only inspection of a contiguous framed buffer.
//!
//! `FrameView::parse` checks the container framing and slices out the six
//! segments. It does not interpret any stream's contents.

use crate::error::NimbleError;
use crate::frame::format::{FrameHeader, StreamKind, HEADER_LEN, STREAM_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    header: FrameHeader,
    segments: [&'a [u8]; STREAM_COUNT],
}

impl<'a> FrameView<'a> {
    /// Validates `bytes` as one framed buffer and borrows its segments.
    ///
    /// # Errors
    /// Returns `NimbleError::FrameFormatError` if the header is truncated or the
    /// header lengths do not add up to exactly the bytes that follow it.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, NimbleError> {
        let header = FrameHeader::decode_le(bytes)?;
        let body = &bytes[HEADER_LEN..];

        if header.body_len() != body.len() as u64 {
            return Err(NimbleError::FrameFormatError(format!(
                "header declares {} body bytes, buffer holds {}",
                header.body_len(),
                body.len()
            )));
        }

        let empty: &'a [u8] = &[];
        let mut segments = [empty; STREAM_COUNT];
        let mut offset = 0usize;
        for kind in StreamKind::ALL {
            let len = header.length(kind) as usize;
            segments[kind.index()] = &body[offset..offset + len];
            offset += len;
        }

        Ok(Self { header, segments })
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    pub fn segment(&self, kind: StreamKind) -> &'a [u8] {
        self.segments[kind.index()]
    }

    /// Total size of the viewed buffer, header included.
    pub fn len(&self) -> usize {
        HEADER_LEN + self.segments.iter().map(|s| s.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(lengths: [u32; 6], body: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for len in lengths {
            bytes.extend_from_slice(&len.to_le_bytes());
        }
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn test_parse_slices_segments_in_order() {
        let bytes = framed([2, 1, 1, 0, 0, 3], b"ab\x01\x03xyz");
        let view = FrameView::parse(&bytes).unwrap();

        assert_eq!(view.segment(StreamKind::FieldBytes), b"ab");
        assert_eq!(view.segment(StreamKind::SizeControl), &[0x01]);
        assert_eq!(view.segment(StreamKind::SizeData), &[0x03]);
        assert!(view.segment(StreamKind::ContentControl).is_empty());
        assert!(view.segment(StreamKind::ContentData).is_empty());
        assert_eq!(view.segment(StreamKind::BinaryData), b"xyz");
        assert_eq!(view.len(), bytes.len());
    }

    #[test]
    fn test_parse_header_only() {
        let bytes = framed([0; 6], &[]);
        let view = FrameView::parse(&bytes).unwrap();
        assert_eq!(view.len(), HEADER_LEN);
    }

    #[test]
    fn test_parse_rejects_short_body() {
        let bytes = framed([0, 0, 0, 0, 0, 4], b"xyz");
        assert!(matches!(
            FrameView::parse(&bytes),
            Err(NimbleError::FrameFormatError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_trailing_bytes() {
        let bytes = framed([1, 0, 0, 0, 0, 0], b"ab");
        let err = FrameView::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("declares 1 body bytes"));
    }

    #[test]
    fn test_parse_rejects_truncated_header() {
        assert!(FrameView::parse(&[0u8; 10]).is_err());
    }
}
