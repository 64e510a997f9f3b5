//! Chunk-grid arithmetic: dividing the logical array into a regular grid
//! of (possibly edge-truncated) chunks and mapping a chunk's linear index
//! back to its multi-dimensional shape and position.
//!
//! All of this is grounded on `calcLengthInChunk` from
//! `original_source/Sources/OmFileFormatC/src/delta2d.c`: a chunk's
//! per-dimension multi-index is recovered from its linear index via
//! repeated `(chunk_index / rolling_multiply) % n_chunks_in_dimension`,
//! last dimension fastest.

#[inline]
pub fn divide_rounded_up(dividend: u64, divisor: u64) -> u64 {
    (dividend + divisor - 1) / divisor
}

/// Number of chunks along one dimension.
#[inline]
pub fn n_chunks_in_dim(dim: u64, chunk: u64) -> u64 {
    divide_rounded_up(dim, chunk)
}

/// Total number of chunks in the grid (product over dimensions).
pub fn total_chunks(dims: &[u64], chunks: &[u64]) -> u64 {
    dims.iter()
        .zip(chunks)
        .map(|(&d, &c)| n_chunks_in_dim(d, c))
        .product()
}

/// Maximum number of elements any single chunk can hold (nominal,
/// pre-truncation, extent).
pub fn max_chunk_elements(chunks: &[u64]) -> u64 {
    chunks.iter().product()
}

/// Decomposes a linear chunk index into its per-dimension chunk
/// coordinate `c0..cN`, last dimension fastest.
pub fn chunk_multi_index(chunk_index: u64, dims: &[u64], chunks: &[u64]) -> Vec<u64> {
    let n = dims.len();
    let mut coords = vec![0u64; n];
    let mut rolling_multiply = 1u64;
    for i in (0..n).rev() {
        let n_chunks = n_chunks_in_dim(dims[i], chunks[i]);
        coords[i] = (chunk_index / rolling_multiply) % n_chunks;
        rolling_multiply *= n_chunks;
    }
    coords
}

/// The actual (possibly edge-truncated) extent of a chunk along every
/// dimension.
pub fn chunk_shape(chunk_index: u64, dims: &[u64], chunks: &[u64]) -> Vec<u64> {
    let coords = chunk_multi_index(chunk_index, dims, chunks);
    coords
        .iter()
        .zip(dims)
        .zip(chunks)
        .map(|((&c0, &dim), &chunk)| std::cmp::min((c0 + 1) * chunk, dim) - c0 * chunk)
        .collect()
}

/// Total element count of a chunk (product of [`chunk_shape`]).
pub fn chunk_length(chunk_index: u64, dims: &[u64], chunks: &[u64]) -> u64 {
    chunk_shape(chunk_index, dims, chunks).iter().product()
}

/// Decomposes a linear row-major index into its per-dimension
/// coordinate, given that buffer's `strides` and `shape`.
pub fn multi_index_from_linear(linear: u64, strides: &[u64], shape: &[u64]) -> Vec<u64> {
    strides
        .iter()
        .zip(shape)
        .map(|(&stride, &extent)| (linear / stride) % extent)
        .collect()
}

/// Row-major strides (last dimension fastest, stride 1) for a buffer
/// with the given per-dimension extents.
pub fn row_major_strides(shape: &[u64]) -> Vec<u64> {
    let n = shape.len();
    let mut strides = vec![1u64; n];
    for i in (0..n.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Whether the chunk at multi-index `coords` intersects the requested
/// hyper-rectangle `[read_offset, read_offset + read_count)`.
pub fn chunk_intersects(
    coords: &[u64],
    chunks: &[u64],
    read_offset: &[u64],
    read_count: &[u64],
) -> bool {
    coords.iter().enumerate().all(|(i, &c)| {
        let chunk_start = c * chunks[i];
        let chunk_end = chunk_start + chunks[i];
        chunk_start < read_offset[i] + read_count[i] && chunk_end > read_offset[i]
    })
}

/// Scans forward from `from` (inclusive) for the next chunk whose
/// multi-index intersects the requested rectangle. Returns `None` once
/// `total_chunks` is reached without finding one.
pub fn next_intersecting_chunk(
    from: u64,
    total_chunks: u64,
    dims: &[u64],
    chunks: &[u64],
    read_offset: &[u64],
    read_count: &[u64],
) -> Option<u64> {
    // A request with zero volume along any dimension intersects nothing.
    if read_count.iter().any(|&c| c == 0) {
        return None;
    }
    let mut idx = from;
    while idx < total_chunks {
        let coords = chunk_multi_index(idx, dims, chunks);
        if chunk_intersects(&coords, chunks, read_offset, read_count) {
            return Some(idx);
        }
        idx += 1;
    }
    None
}
