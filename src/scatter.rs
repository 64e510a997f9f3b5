//! Writing a decoded chunk's values into the caller's output buffer.
//! Only the elements that fall inside the requested hyper-rectangle
//! are written, at the destination offset implied by
//! `cube_offset`/`cube_dimensions`.

use crate::datatype::OutputElement;
use crate::errors::OmDecodeError;
use crate::geometry::{chunk_multi_index, chunk_shape, multi_index_from_linear, row_major_strides};

/// Copies the elements of one decoded chunk that lie inside
/// `[read_offset, read_offset + read_count)` into `output`, translated
/// to `cube_offset`-relative coordinates within a buffer shaped
/// `cube_dimensions`.
///
/// `decoded` holds exactly `chunk_shape(chunk_index, ..)`'s element
/// count of already-unfiltered, already-scaled logical values in
/// row-major order. Each value is cast to `T` via
/// [`OutputElement::from_logical`] as it is written, so a caller
/// requesting an integer `DataType` gets a saturating cast rather than
/// a reinterpreted bit pattern.
#[allow(clippy::too_many_arguments)]
pub fn scatter_chunk<T: OutputElement>(
    chunk_index: u64,
    dims: &[u64],
    chunks: &[u64],
    read_offset: &[u64],
    read_count: &[u64],
    cube_offset: &[u64],
    cube_dimensions: &[u64],
    decoded: &[f32],
    output: &mut [T],
) -> Result<(), OmDecodeError> {
    let shape = chunk_shape(chunk_index, dims, chunks);
    let coords = chunk_multi_index(chunk_index, dims, chunks);
    let chunk_origin: Vec<u64> = coords.iter().zip(chunks).map(|(&c, &ch)| c * ch).collect();
    let chunk_strides = row_major_strides(&shape);
    let cube_strides = row_major_strides(cube_dimensions);

    let chunk_len: u64 = shape.iter().product();
    let output_needed: u64 = cube_dimensions.iter().product();
    if (output.len() as u64) < output_needed {
        return Err(OmDecodeError::OutputBufferTooSmall {
            needed: output_needed as usize,
            got: output.len(),
        });
    }

    for linear in 0..chunk_len {
        let local = multi_index_from_linear(linear, &chunk_strides, &shape);
        let mut inside = true;
        let mut dest_coord = vec![0u64; local.len()];
        for i in 0..local.len() {
            let global = chunk_origin[i] + local[i];
            if global < read_offset[i] || global >= read_offset[i] + read_count[i] {
                inside = false;
                break;
            }
            dest_coord[i] = cube_offset[i] + (global - read_offset[i]);
        }
        if !inside {
            continue;
        }

        let dest_index: u64 = dest_coord.iter().zip(&cube_strides).map(|(&c, &s)| c * s).sum();
        output[dest_index as usize] = T::from_logical(decoded[linear as usize]);
    }

    Ok(())
}
