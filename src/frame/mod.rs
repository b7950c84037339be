// In: src/frame/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Frame Layer
// ====================================================================================
//
// The frame layer owns everything about the finished byte layout and nothing
// about how bytes are written. The `Encoder` only hands it a `StreamSet` once,
// at `finalize`:
//
//   [Encoder::finalize] -> drains 6 sinks -> StreamSet
//         |
//         `-> [FrameAssembler (ContiguousLayout)] -> FramedBuffer (header + segments)
//
//   [FrameView::parse]  <- &[u8] of a contiguous FramedBuffer (inspection only)
//
// ====================================================================================
pub mod assembler;
pub mod format;
pub mod view;

pub use assembler::{assemble, ContiguousLayout, FrameAssembler, FramedBuffer, StreamSet};
pub use format::{FrameHeader, StreamKind, HEADER_LEN, STREAM_COUNT};
pub use view::FrameView;
