use super::IndexReadState;
use crate::decoder::OmDecoder;
use crate::errors::OmDecodeError;
use crate::geometry::next_intersecting_chunk;
use crate::lut;

/// Cursor over compressed-data byte-range instructions within one
/// index-read instruction's chunk range.
#[derive(Debug, Clone, Copy)]
pub struct DataReadState {
    pub chunk_lower: u64,
    pub chunk_upper: u64,
    next_chunk: u64,
    pub offset: u64,
    pub count: u64,
    index_lower: u64,
    index_upper: u64,
}

/// Seeds a data-read cursor from the current index-read instruction.
pub fn init_data_read(index_state: &IndexReadState) -> DataReadState {
    DataReadState {
        chunk_lower: index_state.chunk_lower,
        chunk_upper: index_state.chunk_lower,
        next_chunk: index_state.chunk_lower,
        offset: 0,
        count: 0,
        index_lower: index_state.chunk_lower,
        index_upper: index_state.chunk_upper,
    }
}

/// Advances `state` to the next coalesced compressed-data instruction,
/// decoding `lut_bytes` (the LUT slice for
/// `[index_lower, index_upper + 1]`, as fetched via the matching
/// index-read instruction) to resolve chunk byte ranges.
///
/// Returns `false` once `chunk_index.upper == index_range.upper`.
pub fn next_data_read(
    decoder: &OmDecoder,
    state: &mut DataReadState,
    lut_bytes: &[u8],
) -> Result<bool, OmDecodeError> {
    if state.next_chunk > state.index_upper {
        return Ok(false);
    }

    // `lut_bytes` was fetched by the matching index-read instruction, which
    // always floor/ceil-aligns to whole LUT blocks. The slice's first
    // entry is therefore the block-aligned entry at or before `index_lower`,
    // not `index_lower` itself.
    let lut_chunk_element_count = decoder.lut_chunk_element_count;
    let aligned_start = (state.index_lower / lut_chunk_element_count) * lut_chunk_element_count;
    let total_lut_entries = decoder.total_chunks + 1;
    let last_needed_entry = state.index_upper + 1;
    let aligned_end = (((last_needed_entry / lut_chunk_element_count) + 1) * lut_chunk_element_count)
        .min(total_lut_entries);
    let entry_count = aligned_end - aligned_start;

    let lut = lut::decode_lut_blocks(
        lut_bytes,
        entry_count,
        decoder.lut_chunk_length,
        decoder.lut_chunk_element_count,
    )?;
    let rel = |chunk_index: u64| (chunk_index - aligned_start) as usize;

    let first = match next_intersecting_chunk(
        state.next_chunk,
        state.index_upper + 1,
        decoder.dims,
        decoder.chunks,
        decoder.read_offset,
        decoder.read_count,
    ) {
        Some(f) => f,
        None => {
            state.next_chunk = state.index_upper + 1;
            return Ok(false);
        }
    };

    let (start, count) = lut::chunk_byte_range(&lut, rel(first));
    state.chunk_lower = first;
    state.chunk_upper = first;
    state.offset = start;
    state.count = count;

    let mut cursor = first + 1;
    loop {
        match next_intersecting_chunk(
            cursor,
            state.index_upper + 1,
            decoder.dims,
            decoder.chunks,
            decoder.read_offset,
            decoder.read_count,
        ) {
            None => break,
            Some(candidate) => {
                let (candidate_start, candidate_count) = lut::chunk_byte_range(&lut, rel(candidate));
                let current_end = state.offset + state.count;
                let candidate_end = candidate_start + candidate_count;
                let gap = candidate_start.saturating_sub(current_end);
                let size = candidate_end - state.offset;

                if gap <= decoder.io_size_merge && size <= decoder.io_size_max {
                    state.chunk_upper = candidate;
                    state.count = candidate_end - state.offset;
                    cursor = candidate + 1;
                } else {
                    break;
                }
            }
        }
    }

    state.next_chunk = cursor;
    Ok(true)
}
