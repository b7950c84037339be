//! This module defines the shared traits that connect the encoder's layers.
//!
//! - `SignedInt` / `UnsignedInt` pair each primitive integer with its
//!   same-width counterpart for the zigzag kernel.
//! - `ChunkRepr` is the pre-processing discipline a chunk stream is built with.
//! - `WriteSink` is the write-side API a serializer drives. It is deliberately
//!   independent of how `finalize` lays the streams out.

use bytemuck::Pod;
use num_traits::{PrimInt, Signed, Unsigned};

//==================================================================================
// 1. Integer Pairing
//==================================================================================

/// A signed primitive integer and the unsigned type of the same width.
pub trait SignedInt: PrimInt + Signed + Pod {
    type Unsigned: PrimInt + Unsigned + Pod;
}

/// An unsigned primitive integer and the signed type of the same width.
pub trait UnsignedInt: PrimInt + Unsigned + Pod {
    type Signed: PrimInt + Signed + Pod;
}

macro_rules! impl_int_pair {
    ($S:ty, $U:ty) => {
        impl SignedInt for $S {
            type Unsigned = $U;
        }
        impl UnsignedInt for $U {
            type Signed = $S;
        }
    };
}

impl_int_pair!(i8, u8);
impl_int_pair!(i16, u16);
impl_int_pair!(i32, u32);
impl_int_pair!(i64, u64);

//==================================================================================
// 2. Chunk Disciplines
//==================================================================================

/// The pre-processing applied to every chunk before it is packed.
///
/// Implementors are zero-sized marker types; the chunk stream is generic over
/// one of them, so both disciplines share a single accumulation path.
pub trait ChunkRepr {
    /// Short name used in log records.
    const NAME: &'static str;

    /// Maps a chunk as submitted by the caller to the value that gets packed.
    fn to_wire(chunk: u32) -> u32;

    /// Inverse of `to_wire`.
    fn from_wire(wire: u32) -> u32;
}

/// Values that can be submitted as a single 32-bit chunk.
///
/// Signed values keep their two's-complement bit pattern; the zigzag discipline
/// reinterprets that pattern as `i32` before folding it.
pub trait IntoChunk {
    fn into_chunk(self) -> u32;
}

impl IntoChunk for u32 {
    #[inline]
    fn into_chunk(self) -> u32 {
        self
    }
}

impl IntoChunk for i32 {
    #[inline]
    fn into_chunk(self) -> u32 {
        bytemuck::cast(self)
    }
}

impl IntoChunk for u16 {
    #[inline]
    fn into_chunk(self) -> u32 {
        u32::from(self)
    }
}

impl IntoChunk for i16 {
    #[inline]
    fn into_chunk(self) -> u32 {
        i32::from(self).into_chunk()
    }
}

impl IntoChunk for u8 {
    #[inline]
    fn into_chunk(self) -> u32 {
        u32::from(self)
    }
}

impl IntoChunk for i8 {
    #[inline]
    fn into_chunk(self) -> u32 {
        i32::from(self).into_chunk()
    }
}

//==================================================================================
// 3. Write Sink
//==================================================================================

/// The write-side contract consumed by a schema-aware serializer.
///
/// Every operation is total. Implementations route each call to its own stream;
/// the order of calls across different operations does not affect where bytes
/// end up in the framed output.
pub trait WriteSink {
    /// Submits a length or count. Always non-negative, so it is packed raw.
    fn encode_size_chunk(&mut self, chunk: u32);

    /// Submits a content value, which may be negative.
    fn encode_content_chunk<C: IntoChunk>(&mut self, chunk: C);

    /// Appends string or binary payload bytes verbatim.
    fn encode_binary(&mut self, bytes: &[u8]);

    /// Appends already-serialized field bytes verbatim.
    fn encode_field_bytes(&mut self, bytes: &[u8]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_chunks_keep_their_bit_pattern() {
        assert_eq!((-1i32).into_chunk(), u32::MAX);
        assert_eq!((-1i16).into_chunk(), u32::MAX);
        assert_eq!((-2i8).into_chunk(), u32::MAX - 1);
        assert_eq!(i32::MIN.into_chunk(), 0x8000_0000);
        assert_eq!(200u8.into_chunk(), 200);
        assert_eq!(7u32.into_chunk(), 7);
    }
}
