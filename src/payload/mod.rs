//! Values that encode themselves, and the stream-item conversion built on them.
//!
//! `NimbleWrite` is the seam between a schema-aware value and the `WriteSink`
//! it is written into. `encode_stream_item` is the per-item conversion a
//! server stream plugs in to turn each outcome into a framed payload.

pub mod serialize;
pub mod stream;

pub use serialize::{serialize, serialize_with_config, NimbleWrite};
pub use stream::{encode_stream, encode_stream_item, PayloadEncodeFn, StreamPayload};
