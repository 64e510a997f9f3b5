//! The decoder façade: holds the immutable parameters of one
//! read request and exposes the iterator-style entry points a caller
//! drives to completion.

use crate::chunk_decoder;
use crate::compression::CompressionType;
use crate::datatype::{DataType, OutputElement};
use crate::errors::OmDecodeError;
use crate::geometry;
use crate::planner::{self, DataReadState, IndexReadState};
use crate::scatter;

/// Padding, in bytes, added to [`OmDecoder::read_buffer_size`] to
/// allow a bit-unpack kernel to overread its final word.
const SCRATCH_PADDING: usize = 16;

/// Immutable configuration and derived geometry for one read request.
///
/// Dimension vectors are borrowed, not copied: callers must keep them
/// alive for the decoder's lifetime, matching the source's convention
/// of storing pointers rather than owning the arrays.
pub struct OmDecoder<'a> {
    pub(crate) dims: &'a [u64],
    pub(crate) chunks: &'a [u64],
    pub(crate) read_offset: &'a [u64],
    pub(crate) read_count: &'a [u64],
    pub(crate) cube_offset: &'a [u64],
    pub(crate) cube_dimensions: &'a [u64],
    pub(crate) scalefactor: f32,
    pub(crate) compression: CompressionType,
    pub(crate) datatype: DataType,
    pub(crate) lut_chunk_length: u64,
    pub(crate) lut_chunk_element_count: u64,
    pub(crate) lut_start: u64,
    pub(crate) io_size_merge: u64,
    pub(crate) io_size_max: u64,
    pub(crate) total_chunks: u64,
    pub(crate) max_chunk_elements: u64,
}

impl<'a> OmDecoder<'a> {
    /// Validates the request's dimension vectors and bounds, and
    /// computes the derived chunk-grid geometry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dims: &'a [u64],
        chunks: &'a [u64],
        read_offset: &'a [u64],
        read_count: &'a [u64],
        cube_offset: &'a [u64],
        cube_dimensions: &'a [u64],
        scalefactor: f32,
        compression: CompressionType,
        datatype: DataType,
        lut_chunk_length: u64,
        lut_chunk_element_count: u64,
        lut_start: u64,
        io_size_merge: u64,
        io_size_max: u64,
    ) -> Result<Self, OmDecodeError> {
        let dims_count = dims.len();
        for v in [
            chunks.len(),
            read_offset.len(),
            read_count.len(),
            cube_offset.len(),
            cube_dimensions.len(),
        ] {
            if v != dims_count {
                return Err(OmDecodeError::DimensionCountMismatch {
                    expected: dims_count,
                    got: v,
                });
            }
        }
        if dims_count == 0 || dims.iter().any(|&d| d == 0) || chunks.iter().any(|&c| c == 0) {
            return Err(OmDecodeError::InvalidDimensions);
        }
        for i in 0..dims_count {
            if read_offset[i] + read_count[i] > dims[i] {
                return Err(OmDecodeError::ReadOutOfBounds {
                    dim: i,
                    offset: read_offset[i],
                    count: read_count[i],
                    bound: dims[i],
                });
            }
            if cube_offset[i] + read_count[i] > cube_dimensions[i] {
                return Err(OmDecodeError::ReadOutOfBounds {
                    dim: i,
                    offset: cube_offset[i],
                    count: read_count[i],
                    bound: cube_dimensions[i],
                });
            }
        }

        let total_chunks = geometry::total_chunks(dims, chunks);
        let max_chunk_elements = geometry::max_chunk_elements(chunks);

        Ok(OmDecoder {
            dims,
            chunks,
            read_offset,
            read_count,
            cube_offset,
            cube_dimensions,
            scalefactor,
            compression,
            datatype,
            lut_chunk_length,
            lut_chunk_element_count,
            lut_start,
            io_size_merge,
            io_size_max,
            total_chunks,
            max_chunk_elements,
        })
    }

    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    pub fn max_chunk_elements(&self) -> u64 {
        self.max_chunk_elements
    }

    pub fn bytes_per_element(&self) -> usize {
        self.compression.stored_element_width()
    }

    /// Minimum scratch-buffer size (in bytes) required by
    /// [`Self::decode_chunks`].
    pub fn read_buffer_size(&self) -> usize {
        self.max_chunk_elements as usize * self.bytes_per_element() + SCRATCH_PADDING
    }

    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    pub fn compression(&self) -> CompressionType {
        self.compression
    }

    pub fn init_index_read(&self) -> IndexReadState {
        planner::init_index_read(self)
    }

    pub fn next_index_read(&self, state: &mut IndexReadState) -> bool {
        planner::next_index_read(self, state)
    }

    pub fn init_data_read(&self, index_state: &IndexReadState) -> DataReadState {
        planner::init_data_read(index_state)
    }

    pub fn next_data_read(
        &self,
        state: &mut DataReadState,
        lut_bytes: &[u8],
    ) -> Result<bool, OmDecodeError> {
        planner::next_data_read(self, state, lut_bytes)
    }

    /// Decodes every chunk in `[chunk_lower, chunk_upper]` (inclusive)
    /// out of `data`, scattering the results into `output`.
    ///
    /// `T` is the output element type requested via this decoder's
    /// `datatype` parameter — the call fails with
    /// [`OmDecodeError::OutputTypeMismatch`] if `T::TAG` doesn't match
    /// `self.datatype`, rather than silently reinterpreting the
    /// decoded values as the wrong type.
    ///
    /// Returns the number of chunks decoded.
    pub fn decode_chunks<T: OutputElement>(
        &self,
        chunk_lower: u64,
        chunk_upper: u64,
        data: &[u8],
        output: &mut [T],
        scratch: &mut [u8],
    ) -> Result<usize, OmDecodeError> {
        if T::TAG != self.datatype {
            return Err(OmDecodeError::OutputTypeMismatch {
                requested: self.datatype,
                got: T::TAG,
            });
        }
        if scratch.len() < self.read_buffer_size() {
            return Err(OmDecodeError::ScratchBufferTooSmall {
                needed: self.read_buffer_size(),
                got: scratch.len(),
            });
        }

        let mut cursor: usize = 0;
        let mut decoded_count = 0usize;
        for chunk_index in chunk_lower..=chunk_upper {
            if chunk_index >= self.total_chunks {
                return Err(OmDecodeError::ChunkIndexOutOfBounds {
                    index: chunk_index,
                    total_chunks: self.total_chunks,
                });
            }
            let remaining = data.get(cursor..).ok_or(OmDecodeError::TruncatedChunk {
                consumed: cursor as u64,
                available: data.len() as u64,
            })?;

            let (consumed, decoded) = chunk_decoder::decode_chunk(
                chunk_index,
                self.dims,
                self.chunks,
                self.compression,
                self.scalefactor,
                remaining,
                scratch,
            )?;

            scatter::scatter_chunk(
                chunk_index,
                self.dims,
                self.chunks,
                self.read_offset,
                self.read_count,
                self.cube_offset,
                self.cube_dimensions,
                &decoded,
                output,
            )?;

            cursor += consumed as usize;
            decoded_count += 1;
        }

        Ok(decoded_count)
    }
}
