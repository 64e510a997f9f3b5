use crate::bitpack::{bits_mask, round_up_to_8, LaneWidth};
use crate::errors::OmDecodeError;
use crate::packers::Packable;

/// Reads up to 8 bytes from `src` starting at `offset` as a
/// little-endian `u64`, zero-padding past the end of the slice.
///
/// This is the safe, bounds-checked equivalent of the source's
/// practice of reinterpreting the input pointer as a wider integer
/// type and reading past nominal element boundaries; callers are
/// expected to size their real buffers with the documented padding
/// (see `OmDecoder::read_buffer_size`) so this padding is only ever
/// exercised on the final, possibly short, word of a chunk.
#[inline]
fn read_u64_le_padded(src: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    if offset < src.len() {
        let available = (src.len() - offset).min(8);
        buf[..available].copy_from_slice(&src[offset..offset + available]);
    }
    u64::from_le_bytes(buf)
}

/// Unpacks `n` values of `b` bits each from `src` into `dst`, where
/// `dst` holds `n` contiguous little-endian `T` elements.
///
/// `b = 0` writes `n` zeros and consumes no input. `b = T::WIDTH_BITS`
/// is a plain copy. Values straddling a 64-bit word boundary are
/// reconstructed from the two words they span.
///
/// Returns the number of input bytes consumed, rounded up to a
/// multiple of 8.
pub fn unpack<T: LaneWidth>(src: &[u8], n: usize, b: u8, dst: &mut [u8]) -> Result<u64, OmDecodeError> {
    if b > T::WIDTH_BITS {
        return Err(OmDecodeError::BitWidthExceedsElementWidth {
            bits: b,
            element_width: T::WIDTH_BITS,
        });
    }
    let elem_size = std::mem::size_of::<T>();
    let needed = n * elem_size;
    if dst.len() < needed {
        return Err(OmDecodeError::ScratchBufferTooSmall {
            needed,
            got: dst.len(),
        });
    }

    if b == 0 {
        for i in 0..n {
            T::default().pack_into(&mut dst[i * elem_size..i * elem_size + elem_size]);
        }
        return Ok(0);
    }

    let mask = bits_mask(b);
    for i in 0..n {
        let bit_pos = i as u64 * b as u64;
        let word_idx = bit_pos / 64;
        let hi_shift = bit_pos % 64;

        let w0 = read_u64_le_padded(src, (word_idx * 8) as usize);
        let value = if b == 64 {
            w0
        } else if hi_shift + b as u64 <= 64 {
            (w0 >> hi_shift) & mask
        } else {
            let w1 = read_u64_le_padded(src, ((word_idx + 1) * 8) as usize);
            let lo_shift = 64 - hi_shift;
            (w0 >> hi_shift) | ((w1 << lo_shift) & mask)
        };

        T::truncate_from_u64(value).pack_into(&mut dst[i * elem_size..i * elem_size + elem_size]);
    }

    let consumed_bits = n as u64 * b as u64;
    let consumed_bytes = (consumed_bits + 7) / 8;
    Ok(round_up_to_8(consumed_bytes))
}

/// Like [`unpack`] but treats the decoded lanes as successive
/// differences and reconstructs the running sum, carrying `start`
/// across calls (used for the delta-coded LUT, whose entries are
/// strictly non-decreasing 64-bit offsets).
///
/// `*start` is updated in place to the last emitted value, so that a
/// caller decoding independently bit-packed LUT blocks in sequence can
/// simply thread the same accumulator through each block.
pub fn unpack_delta(
    src: &[u8],
    n: usize,
    b: u8,
    dst: &mut [u8],
    start: &mut u64,
) -> Result<u64, OmDecodeError> {
    let consumed = unpack::<u64>(src, n, b, dst)?;
    for i in 0..n {
        let residual = u64::unpack_from(&dst[i * 8..i * 8 + 8]);
        *start = start.wrapping_add(residual);
        start.pack_into(&mut dst[i * 8..i * 8 + 8]);
    }
    Ok(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitpack::pack;

    fn roundtrip<T: LaneWidth + std::fmt::Debug + PartialEq>(values: &[u64], b: u8) {
        let mut packed = Vec::new();
        pack::<T>(values, b, &mut packed);
        // pad so the unpacker's overread never runs off the end.
        packed.resize(packed.len() + 8, 0);

        let elem_size = std::mem::size_of::<T>();
        let mut dst = vec![0u8; values.len() * elem_size];
        unpack::<T>(&packed, values.len(), b, &mut dst).unwrap();

        for (i, &expected) in values.iter().enumerate() {
            let got = T::unpack_from(&dst[i * elem_size..i * elem_size + elem_size]);
            assert_eq!(got.widen_to_u64(), expected, "b={} i={}", b, i);
        }
    }

    #[test]
    fn zero_bits_is_all_zero_and_consumes_nothing() {
        let mut dst = vec![0xFFu8; 4 * 2];
        let consumed = unpack::<u16>(&[], 4, 0, &mut dst).unwrap();
        assert_eq!(consumed, 0);
        assert_eq!(dst, vec![0u8; 8]);
    }

    #[test]
    fn every_bit_width_roundtrips_u16() {
        let values: Vec<u64> = (0..37).map(|i| (i * 2654435761u64) % (1 << 16)).collect();
        for b in 0..=16u8 {
            let bounded: Vec<u64> = if b == 0 {
                vec![0; values.len()]
            } else {
                values.iter().map(|&v| v & crate::bitpack::bits_mask(b)).collect()
            };
            roundtrip::<u16>(&bounded, b);
        }
    }

    #[test]
    fn every_bit_width_roundtrips_u64() {
        for b in [0u8, 1, 3, 7, 17, 31, 32, 47, 63, 64] {
            let values: Vec<u64> = (0..20)
                .map(|i| {
                    let raw = (i as u64).wrapping_mul(0x9E3779B97F4A7C15);
                    if b == 64 {
                        raw
                    } else {
                        raw & crate::bitpack::bits_mask(b)
                    }
                })
                .collect();
            roundtrip::<u64>(&values, b);
        }
    }

    #[test]
    fn plain_copy_when_b_equals_width() {
        let values: Vec<u64> = vec![0, 1, 255, 128, 42];
        roundtrip::<u8>(&values, 8);
    }

    #[test]
    fn rejects_bit_width_above_element_width() {
        let mut dst = vec![0u8; 4];
        let err = unpack::<u16>(&[0, 0, 0, 0], 2, 17, &mut dst).unwrap_err();
        assert!(matches!(
            err,
            OmDecodeError::BitWidthExceedsElementWidth {
                bits: 17,
                element_width: 16
            }
        ));
    }

    #[test]
    fn delta_variant_reconstructs_monotonic_sequence() {
        let residuals: Vec<u64> = vec![10, 3, 0, 7, 1];
        let mut packed = Vec::new();
        pack::<u64>(&residuals, 5, &mut packed);
        packed.resize(packed.len() + 8, 0);

        let mut dst = vec![0u8; residuals.len() * 8];
        let mut start = 0u64;
        unpack_delta(&packed, residuals.len(), 5, &mut dst, &mut start).unwrap();

        let mut expected = 0u64;
        for (i, &r) in residuals.iter().enumerate() {
            expected += r;
            let got = u64::unpack_from(&dst[i * 8..i * 8 + 8]);
            assert_eq!(got, expected);
        }
        assert_eq!(start, expected);
    }
}
