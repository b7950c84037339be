// In: src/payload/serialize.rs

use crate::config::EncoderConfig;
use crate::encoder::Encoder;
use crate::error::NimbleError;
use crate::frame::FramedBuffer;
use crate::traits::WriteSink;

/// A value that knows how to write itself into the nimble streams.
///
/// Implementations call the sink's operations in the order a reader will visit
/// them. Lengths and counts go to size chunks, scalars to content chunks and
/// string bytes to binary data.
pub trait NimbleWrite {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError>;
}

/// Writes `len` as a size chunk.
fn write_len<S: WriteSink>(sink: &mut S, len: usize) -> Result<(), NimbleError> {
    let len = u32::try_from(len).map_err(|_| NimbleError::LengthOverflow(len))?;
    sink.encode_size_chunk(len);
    Ok(())
}

impl NimbleWrite for u32 {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        sink.encode_content_chunk(*self);
        Ok(())
    }
}

impl NimbleWrite for i32 {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        sink.encode_content_chunk(*self);
        Ok(())
    }
}

impl NimbleWrite for bool {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        sink.encode_content_chunk(u32::from(*self));
        Ok(())
    }
}

impl NimbleWrite for str {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        write_len(sink, self.len())?;
        sink.encode_binary(self.as_bytes());
        Ok(())
    }
}

impl NimbleWrite for String {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        self.as_str().write_nimble(sink)
    }
}

impl<T: NimbleWrite> NimbleWrite for [T] {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        write_len(sink, self.len())?;
        for item in self {
            item.write_nimble(sink)?;
        }
        Ok(())
    }
}

impl<T: NimbleWrite> NimbleWrite for Vec<T> {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        self.as_slice().write_nimble(sink)
    }
}

/// Presence is a size chunk of 0 or 1, followed by the value when present.
impl<T: NimbleWrite> NimbleWrite for Option<T> {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        match self {
            Some(value) => {
                sink.encode_size_chunk(1);
                value.write_nimble(sink)
            }
            None => {
                sink.encode_size_chunk(0);
                Ok(())
            }
        }
    }
}

impl<T: NimbleWrite + ?Sized> NimbleWrite for &T {
    fn write_nimble<S: WriteSink>(&self, sink: &mut S) -> Result<(), NimbleError> {
        (**self).write_nimble(sink)
    }
}

/// Encodes one value into a framed buffer with the default configuration.
pub fn serialize<T: NimbleWrite + ?Sized>(value: &T) -> Result<FramedBuffer, NimbleError> {
    let mut encoder = Encoder::new();
    value.write_nimble(&mut encoder)?;
    encoder.finalize()
}

/// Encodes one value into a framed buffer using `config`.
pub fn serialize_with_config<T: NimbleWrite + ?Sized>(
    value: &T,
    config: &EncoderConfig,
) -> Result<FramedBuffer, NimbleError> {
    let mut encoder = Encoder::with_config(config)?;
    value.write_nimble(&mut encoder)?;
    encoder.finalize()
}
