//! Per-chunk decode procedure: bit-unpack, inverse filter,
//! inverse scale. Scatter into the caller's output buffer is a
//! separate step ([`crate::scatter`]) driven by the façade, since it
//! needs the full read-request geometry that a single chunk decode
//! doesn't.
//!
//! Each compressed chunk blob is prefixed by one header byte carrying
//! its per-chunk bit width `b`; this is the convention this crate's
//! encode side is documented to use (the exact header format is
//! implementation-defined and requires only that encoder and decoder
//! agree).

use crate::bitpack::unpack;
use crate::compression::CompressionType;
use crate::errors::OmDecodeError;
use crate::filters;
use crate::geometry::chunk_shape;
use crate::packers::Packable;
use crate::scale;

/// Decodes one chunk's compressed blob into its logical `f32` values,
/// in row-major order matching [`crate::geometry::chunk_shape`].
///
/// Returns the number of bytes of `data` consumed by this chunk (the
/// header byte plus the bit-packed body) and the decoded values.
pub fn decode_chunk(
    chunk_index: u64,
    dims: &[u64],
    chunks: &[u64],
    compression: CompressionType,
    scalefactor: f32,
    data: &[u8],
    scratch: &mut [u8],
) -> Result<(u64, Vec<f32>), OmDecodeError> {
    let shape = chunk_shape(chunk_index, dims, chunks);
    let n = shape.iter().product::<u64>() as usize;

    let header = *data.first().ok_or(OmDecodeError::TruncatedChunk {
        consumed: 1,
        available: data.len() as u64,
    })?;
    let elem_bits = compression.stored_element_bits();
    if header > elem_bits {
        return Err(OmDecodeError::BitWidthExceedsElementWidth {
            bits: header,
            element_width: elem_bits,
        });
    }
    let body = &data[1..];

    match compression {
        CompressionType::LinearQuantized16Bit | CompressionType::LogQuantized16Bit => {
            let needed = n * 2;
            if scratch.len() < needed {
                return Err(OmDecodeError::ScratchBufferTooSmall {
                    needed,
                    got: scratch.len(),
                });
            }
            let consumed = unpack::<u16>(body, n, header, &mut scratch[..needed])?;

            let mut stored: Vec<i16> = (0..n)
                .map(|i| u16::unpack_from(&scratch[i * 2..i * 2 + 2]) as i16)
                .collect();
            filters::decode_delta_nd(&mut stored, &shape);

            let mut out = vec![0f32; n];
            if compression.is_logarithmic() {
                scale::decode_logarithmic_slice(&stored, scalefactor, &mut out);
            } else {
                scale::decode_linear_slice(&stored, scalefactor, &mut out);
            }
            Ok((1 + consumed, out))
        }
        CompressionType::XorFloat32 => {
            let needed = n * 4;
            if scratch.len() < needed {
                return Err(OmDecodeError::ScratchBufferTooSmall {
                    needed,
                    got: scratch.len(),
                });
            }
            let consumed = unpack::<u32>(body, n, header, &mut scratch[..needed])?;

            let mut stored: Vec<f32> = (0..n)
                .map(|i| f32::from_bits(u32::unpack_from(&scratch[i * 4..i * 4 + 4])))
                .collect();
            filters::decode_xor_nd(&mut stored, &shape);
            Ok((1 + consumed, stored))
        }
    }
}
