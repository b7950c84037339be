//! The nimble encoder orchestrator.
//!
//! A serializer that already knows the schema drives an `Encoder` through the
//! `WriteSink` operations in field-visit order:
//!
//! - `encode_size_chunk`    -> raw chunk stream     (size-control, size-data)
//! - `encode_content_chunk` -> zigzag chunk stream  (content-control, content-data)
//! - `encode_binary`        -> binary-data
//! - `encode_field_bytes`   -> field-bytes (paged)
//!
//! and then calls `finalize` exactly once to get the `FramedBuffer`.

mod session;

pub use self::session::Encoder;
