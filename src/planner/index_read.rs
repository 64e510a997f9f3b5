use crate::decoder::OmDecoder;
use crate::geometry::next_intersecting_chunk;

/// Cursor over LUT-byte-range instructions.
///
/// `chunk_lower`/`chunk_upper` is the inclusive range of chunks the
/// most recently emitted instruction covers; `offset`/`count` is that
/// instruction's byte range within the LUT region (relative to the
/// start of the file, i.e. already including `lut_start`).
#[derive(Debug, Clone, Copy)]
pub struct IndexReadState {
    pub chunk_lower: u64,
    pub chunk_upper: u64,
    next_chunk: u64,
    pub offset: u64,
    pub count: u64,
}

fn block_start_byte(decoder: &OmDecoder, entry_index: u64) -> u64 {
    decoder.lut_start + (entry_index / decoder.lut_chunk_element_count) * decoder.lut_chunk_length
}

fn block_end_byte(decoder: &OmDecoder, entry_index: u64) -> u64 {
    decoder.lut_start
        + (entry_index / decoder.lut_chunk_element_count + 1) * decoder.lut_chunk_length
}

/// Seeds a cursor at the first chunk intersecting the request.
pub fn init_index_read(decoder: &OmDecoder) -> IndexReadState {
    let first = next_intersecting_chunk(
        0,
        decoder.total_chunks,
        decoder.dims,
        decoder.chunks,
        decoder.read_offset,
        decoder.read_count,
    );
    let (lower, next_chunk) = match first {
        Some(f) => (f, f),
        None => (decoder.total_chunks, decoder.total_chunks),
    };
    IndexReadState {
        chunk_lower: lower,
        chunk_upper: lower,
        next_chunk,
        offset: 0,
        count: 0,
    }
}

/// Advances `state` to the next coalesced LUT-byte-range instruction.
///
/// Returns `false` once the request's chunk range is exhausted.
pub fn next_index_read(decoder: &OmDecoder, state: &mut IndexReadState) -> bool {
    if state.next_chunk >= decoder.total_chunks {
        return false;
    }

    let first = match next_intersecting_chunk(
        state.next_chunk,
        decoder.total_chunks,
        decoder.dims,
        decoder.chunks,
        decoder.read_offset,
        decoder.read_count,
    ) {
        Some(f) => f,
        None => {
            state.next_chunk = decoder.total_chunks;
            return false;
        }
    };

    state.chunk_lower = first;
    state.chunk_upper = first;
    state.offset = block_start_byte(decoder, first);
    state.count = block_end_byte(decoder, first + 1) - state.offset;

    let mut cursor = first + 1;
    loop {
        match next_intersecting_chunk(
            cursor,
            decoder.total_chunks,
            decoder.dims,
            decoder.chunks,
            decoder.read_offset,
            decoder.read_count,
        ) {
            None => break,
            Some(candidate) => {
                let current_end = state.offset + state.count;
                let candidate_entry_start = block_start_byte(decoder, candidate);
                let candidate_end = block_end_byte(decoder, candidate + 1);
                let gap = candidate_entry_start.saturating_sub(current_end);
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
    true
}
