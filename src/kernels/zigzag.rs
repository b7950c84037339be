//! This module contains the pure, stateless kernels for Zig-zag encoding and
//! decoding.
//!
//! Zig-zag is a lossless, bijective mapping of signed integers onto unsigned
//! integers that keeps small magnitudes small: `0, -1, 1, -2, 2, ...` map to
//! `0, 1, 2, 3, 4, ...`. The content stream uses it so that small negative values
//! pack into as few data bytes as small positive ones. This module is panic-free
//! and contains no `unsafe`.

use num_traits::{One, Zero};

use crate::traits::{SignedInt, UnsignedInt};

//==================================================================================
// 1. Generic Core Logic
//==================================================================================

/// Encodes a single signed integer using the Zig-zag algorithm.
#[inline]
pub fn encode_val<T: SignedInt>(n: T) -> T::Unsigned {
    let bits = std::mem::size_of::<T>() * 8;
    // `>>` on a signed primitive is arithmetic, so this spreads the sign bit.
    let folded = (n << 1) ^ (n >> (bits - 1));
    bytemuck::cast(folded)
}

/// Decodes a single unsigned integer back to its signed representation.
#[inline]
pub fn decode_val<U: UnsignedInt>(n: U) -> U::Signed {
    let magnitude: U::Signed = bytemuck::cast(n >> 1);
    let sign_bit: U::Signed = bytemuck::cast(n & <U as One>::one());
    // (n >> 1) ^ -(n & 1)
    magnitude ^ (<U::Signed as Zero>::zero() - sign_bit)
}

//==================================================================================
// 2. 32-bit Chunk View
//==================================================================================

/// Folds a chunk whose bit pattern is an `i32` into its zigzag form.
#[inline]
pub fn encode_chunk(chunk: u32) -> u32 {
    encode_val::<i32>(bytemuck::cast(chunk))
}

/// Unfolds a zigzag chunk back into the original `i32` bit pattern.
#[inline]
pub fn decode_chunk(wire: u32) -> u32 {
    bytemuck::cast(decode_val::<u32>(wire))
}

//==================================================================================
// 3. Slice API
//==================================================================================

/// Encodes every value of `input_slice`, appending the results to `output`.
pub fn encode_slice<T: SignedInt>(input_slice: &[T], output: &mut Vec<T::Unsigned>) {
    output.reserve(input_slice.len());
    output.extend(input_slice.iter().map(|&value| encode_val(value)));
}

/// Decodes every value of `input_slice`, appending the results to `output`.
pub fn decode_slice<U: UnsignedInt>(input_slice: &[U], output: &mut Vec<U::Signed>) {
    output.reserve(input_slice.len());
    output.extend(input_slice.iter().map(|&value| decode_val(value)));
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_core_logic_i32() {
        assert_eq!(encode_val(0i32), 0u32);
        assert_eq!(encode_val(-1i32), 1u32);
        assert_eq!(encode_val(1i32), 2u32);
        assert_eq!(encode_val(-2i32), 3u32);

        assert_eq!(decode_val(0u32), 0i32);
        assert_eq!(decode_val(1u32), -1i32);
        assert_eq!(decode_val(2u32), 1i32);
        assert_eq!(decode_val(3u32), -2i32);
    }

    #[test]
    fn test_extremes_i32() {
        assert_eq!(encode_val(i32::MAX), u32::MAX - 1);
        assert_eq!(encode_val(i32::MIN), u32::MAX);
        assert_eq!(decode_val(u32::MAX - 1), i32::MAX);
        assert_eq!(decode_val(u32::MAX), i32::MIN);
    }

    #[test]
    fn test_chunk_view_roundtrip() {
        for value in [0i32, 1, -1, 63, -64, i32::MAX, i32::MIN] {
            let chunk: u32 = bytemuck::cast(value);
            let wire = encode_chunk(chunk);
            assert_eq!(decode_chunk(wire), chunk, "value {}", value);
        }
        assert_eq!(encode_chunk(bytemuck::cast(-1i32)), 1);
    }

    #[test]
    fn test_slice_roundtrip_i16() {
        let original: Vec<i16> = vec![-5, 4, -3, 2, -1, 0, 100, -100, i16::MIN, i16::MAX];

        let mut encoded = Vec::new();
        encode_slice(&original, &mut encoded);
        assert_eq!(encoded[0], 9u16); // -5 -> 9
        assert_eq!(encoded[1], 8u16); //  4 -> 8

        let mut decoded = Vec::new();
        decode_slice(&encoded, &mut decoded);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_max_min_values_i64() {
        let original: Vec<i64> = vec![i64::MAX, i64::MIN, -1, 0, 1];
        let mut encoded = Vec::new();
        encode_slice(&original, &mut encoded);
        let mut decoded = Vec::new();
        decode_slice(&encoded, &mut decoded);
        assert_eq!(decoded, original);
    }
}
