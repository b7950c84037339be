//! Pure, stateless integer kernels used by the chunk streams.
//!
//! Nothing in here owns a buffer between calls; the buffering lives in
//! `streams::chunk_stream`.

/// Signed-to-unsigned folding for the content discipline.
pub mod zigzag;

/// Group-of-four control/data packing shared by both disciplines.
pub mod chunk_codec;
