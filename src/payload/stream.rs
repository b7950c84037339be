// In: src/payload/stream.rs

use crate::error::NimbleError;
use crate::frame::FramedBuffer;
use crate::payload::serialize::{serialize, NimbleWrite};

/// One encoded item of a server stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPayload {
    pub payload: FramedBuffer,
}

impl StreamPayload {
    pub fn new(payload: FramedBuffer) -> Self {
        Self { payload }
    }

    /// Encoded size of the item, header included.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.payload.into_bytes()
    }
}

/// The per-item conversion a server stream is constructed with.
pub type PayloadEncodeFn<T, E> = fn(Result<T, E>) -> Result<StreamPayload, E>;

/// Converts one stream outcome into an encoded payload.
///
/// A failed outcome passes through untouched. A value that fails to encode is
/// reported as `E` through its `From<NimbleError>` conversion.
pub fn encode_stream_item<T, E>(item: Result<T, E>) -> Result<StreamPayload, E>
where
    T: NimbleWrite,
    E: From<NimbleError>,
{
    let value = item?;
    let framed = serialize(&value)?;
    Ok(StreamPayload::new(framed))
}

/// Applies `encode_stream_item` lazily to every outcome of `items`.
pub fn encode_stream<T, E, I>(items: I) -> impl Iterator<Item = Result<StreamPayload, E>>
where
    T: NimbleWrite,
    E: From<NimbleError>,
    I: IntoIterator<Item = Result<T, E>>,
{
    items.into_iter().map(encode_stream_item::<T, E>)
}
