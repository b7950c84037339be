//! The append-only sinks an `Encoder` routes its writes into.
//!
//! - `ByteStream`: plain owned buffer (binary data, chunk outputs).
//! - `FieldAppender`: paged buffer for many small field-byte writes.
//! - `BufferingChunkEncoder`: the raw/zigzag chunk streams.

pub mod byte_stream;
pub mod chunk_stream;
pub mod field_appender;

pub use byte_stream::ByteStream;
pub use chunk_stream::{decode_chunks, BufferingChunkEncoder, ChunkStreamOutput, Raw, Zigzag};
pub use field_appender::FieldAppender;
