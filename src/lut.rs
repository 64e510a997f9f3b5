//! Decoding the chunk lookup table: a sequence of monotonically
//! non-decreasing 64-bit compressed-byte offsets, one per chunk plus a
//! trailing sentinel, stored as independently bit-packed, delta-coded
//! blocks of `lut_chunk_element_count` entries occupying
//! `lut_chunk_length` bytes each.

use crate::bitpack::unpack_delta;
use crate::errors::OmDecodeError;
use crate::packers::Packable;

/// Decodes `entry_count` consecutive LUT entries starting at a block
/// boundary from `lut_bytes`.
///
/// `lut_bytes` must begin at the first byte of the block containing
/// the first entry being decoded — exactly what the index-read
/// planner's instructions guarantee (they always fetch whole LUT
/// blocks). Each block is laid out as a one-byte bit width `b`
/// followed by up to `lut_chunk_element_count` delta-coded, `b`-bit
/// packed `u64` residuals.
///
/// The running delta accumulator resets to zero at the start of every
/// block rather than threading across block boundaries: each block's
/// first residual is encoded as an absolute value (delta from 0), which
/// is what lets a caller decode any block in isolation — fetching only
/// the LUT slice covering the chunks of interest, without first
/// decoding every earlier block to recover a running total.
pub fn decode_lut_blocks(
    lut_bytes: &[u8],
    entry_count: u64,
    lut_chunk_length: u64,
    lut_chunk_element_count: u64,
) -> Result<Vec<u64>, OmDecodeError> {
    let mut out = Vec::with_capacity(entry_count as usize);
    let mut remaining = entry_count;
    let mut block_offset: usize = 0;

    while remaining > 0 {
        let header = *lut_bytes
            .get(block_offset)
            .ok_or(OmDecodeError::TruncatedChunk {
                consumed: block_offset as u64 + 1,
                available: lut_bytes.len() as u64,
            })?;

        let n_in_block = remaining.min(lut_chunk_element_count) as usize;
        let body_start = block_offset + 1;
        let body_end = block_offset + lut_chunk_length as usize;
        let body = lut_bytes
            .get(body_start..body_end)
            .ok_or(OmDecodeError::TruncatedChunk {
                consumed: body_end as u64,
                available: lut_bytes.len() as u64,
            })?;

        let mut dst = vec![0u8; n_in_block * 8];
        let mut start = 0u64;
        unpack_delta(body, n_in_block, header, &mut dst, &mut start)?;

        for i in 0..n_in_block {
            let value = u64::unpack_from(&dst[i * 8..i * 8 + 8]);
            if let Some(&prev) = out.last() {
                if value < prev {
                    return Err(OmDecodeError::NonMonotonicLut {
                        index: out.len() as u64 - 1,
                        prev,
                        next: value,
                    });
                }
            }
            out.push(value);
        }

        block_offset += lut_chunk_length as usize;
        remaining -= n_in_block as u64;
    }

    Ok(out)
}

/// The compressed byte range `[offset, offset + count)` of chunk `i`,
/// given its decoded LUT entries `lut[i]` and `lut[i + 1]` relative to
/// the start of the decoded slice.
#[inline]
pub fn chunk_byte_range(lut: &[u64], relative_index: usize) -> (u64, u64) {
    let start = lut[relative_index];
    let end = lut[relative_index + 1];
    (start, end - start)
}
