//! This module contains the stateless kernels that pack 32-bit chunks into a
//! control substream and a data substream.
//!
//! Chunks are packed in groups of four. Each group produces exactly one control
//! byte holding a 2-bit width code per chunk (chunk `i` in bits `2i..2i+2`,
//! lowest bits first) and between 0 and 16 data bytes:
//!
//! | code | data bytes | value range          |
//! |------|------------|----------------------|
//! | `0`  | 0          | `0`                  |
//! | `1`  | 1          | `1..=0xFF`           |
//! | `2`  | 2          | `0x100..=0xFFFF`     |
//! | `3`  | 4          | `0x1_0000..=u32::MAX`|
//!
//! Data bytes are little-endian. A short final group is padded with code `0`,
//! which costs no data bytes. The decoder therefore needs the chunk count from
//! the caller; it never infers it.

use crate::error::NimbleError;

//==================================================================================
// 1. Format Constants
//==================================================================================

/// Number of chunks described by one control byte.
pub const CHUNKS_PER_GROUP: usize = 4;

/// Data bytes used by each width code.
const CODE_LENGTHS: [usize; 4] = [0, 1, 2, 4];

//==================================================================================
// 2. Width Selection
//==================================================================================

/// Returns the 2-bit width code for `value`.
#[inline]
pub fn width_code(value: u32) -> u8 {
    match value {
        0 => 0,
        1..=0xFF => 1,
        0x100..=0xFFFF => 2,
        _ => 3,
    }
}

/// Returns the number of data bytes a chunk of `value` occupies.
#[inline]
pub fn data_len(value: u32) -> usize {
    CODE_LENGTHS[width_code(value) as usize]
}

/// Upper bound of `(control, data)` bytes needed for `count` chunks.
pub fn max_encoded_len(count: usize) -> (usize, usize) {
    (count.div_ceil(CHUNKS_PER_GROUP), count * 4)
}

//==================================================================================
// 3. Encode
//==================================================================================

/// Packs up to four chunks into one control byte and their data bytes.
///
/// Slots past `group.len()` are encoded as zero-width padding.
pub fn encode_group(group: &[u32], control: &mut Vec<u8>, data: &mut Vec<u8>) {
    debug_assert!(
        group.len() <= CHUNKS_PER_GROUP,
        "a group holds at most {} chunks, got {}",
        CHUNKS_PER_GROUP,
        group.len()
    );

    let mut control_byte = 0u8;
    for (slot, &value) in group.iter().enumerate() {
        let code = width_code(value);
        control_byte |= code << (2 * slot);
        let len = CODE_LENGTHS[code as usize];
        data.extend_from_slice(&value.to_le_bytes()[..len]);
    }
    control.push(control_byte);
}

/// Packs a whole slice of chunks, appending to `control` and `data`.
pub fn encode(chunks: &[u32], control: &mut Vec<u8>, data: &mut Vec<u8>) {
    let (control_len, data_len) = max_encoded_len(chunks.len());
    control.reserve(control_len);
    data.reserve(data_len);
    for group in chunks.chunks(CHUNKS_PER_GROUP) {
        encode_group(group, control, data);
    }
}

//==================================================================================
// 4. Decode
//==================================================================================

/// Unpacks exactly `count` chunks from a control/data pair.
///
/// # Errors
/// Returns `NimbleError::ChunkDecodeError` if either substream is truncated,
/// if bytes remain after `count` chunks, or if a padding slot is not zero-width.
pub fn decode(control: &[u8], data: &[u8], count: usize) -> Result<Vec<u32>, NimbleError> {
    let groups = count.div_ceil(CHUNKS_PER_GROUP);
    if control.len() != groups {
        return Err(NimbleError::ChunkDecodeError(format!(
            "expected {} control bytes for {} chunks, found {}",
            groups,
            count,
            control.len()
        )));
    }

    let mut decoded = Vec::with_capacity(count);
    let mut pos = 0usize;

    for (group_idx, &control_byte) in control.iter().enumerate() {
        for slot in 0..CHUNKS_PER_GROUP {
            let code = (control_byte >> (2 * slot)) & 0b11;
            let chunk_idx = group_idx * CHUNKS_PER_GROUP + slot;

            if chunk_idx >= count {
                if code != 0 {
                    return Err(NimbleError::ChunkDecodeError(format!(
                        "padding slot {} of final group has width code {}",
                        slot, code
                    )));
                }
                continue;
            }

            let len = CODE_LENGTHS[code as usize];
            let bytes = data.get(pos..pos + len).ok_or_else(|| {
                NimbleError::ChunkDecodeError(format!(
                    "data stream truncated at chunk {}: need {} bytes at offset {}, have {}",
                    chunk_idx,
                    len,
                    pos,
                    data.len()
                ))
            })?;

            let mut le = [0u8; 4];
            le[..len].copy_from_slice(bytes);
            decoded.push(u32::from_le_bytes(le));
            pos += len;
        }
    }

    if pos != data.len() {
        return Err(NimbleError::ChunkDecodeError(format!(
            "{} trailing data bytes after {} chunks",
            data.len() - pos,
            count
        )));
    }

    Ok(decoded)
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
