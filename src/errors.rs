//! Definitions of error related things.

use std::fmt;

use crate::datatype::DataType;

/// Errors produced while configuring or driving a decode.
#[derive(Debug)]
#[non_exhaustive]
pub enum OmDecodeError {
    /// `dims`, `chunks`, `read_offset`, `read_count`, `cube_offset` or
    /// `cube_dimensions` did not all carry `dims_count` entries.
    DimensionCountMismatch { expected: usize, got: usize },
    /// A dimension or chunk extent of zero was supplied.
    InvalidDimensions,
    /// `read_offset[i] + read_count[i] > dims[i]`, or the equivalent for
    /// the destination cube.
    ReadOutOfBounds {
        dim: usize,
        offset: u64,
        count: u64,
        bound: u64,
    },
    /// A chunk index produced or consumed during planning exceeds
    /// `total_chunks`.
    ChunkIndexOutOfBounds { index: u64, total_chunks: u64 },
    /// The per-chunk bit width recorded in the stream exceeds the
    /// element width of the stored type.
    BitWidthExceedsElementWidth { bits: u8, element_width: u8 },
    /// A chunk's compressed blob claims to need more bytes than were
    /// handed to `decode_chunks`.
    TruncatedChunk { consumed: u64, available: u64 },
    /// The LUT violated `LUT[i+1] >= LUT[i]`.
    NonMonotonicLut { index: u64, prev: u64, next: u64 },
    /// The caller-provided scratch buffer is smaller than
    /// `read_buffer_size()` requires.
    ScratchBufferTooSmall { needed: usize, got: usize },
    /// The caller-provided output buffer is too small for the
    /// destination cube.
    OutputBufferTooSmall { needed: usize, got: usize },
    /// `decode_chunks::<T>` was called with a `T` whose `DataType` tag
    /// doesn't match the decoder's configured `datatype`.
    OutputTypeMismatch { requested: DataType, got: DataType },
}

impl fmt::Display for OmDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            OmDecodeError::DimensionCountMismatch { expected, got } => write!(
                f,
                "expected {} entries for every dimension vector, got {}",
                expected, got
            ),
            OmDecodeError::InvalidDimensions => write!(
                f,
                "dims and chunks must each have at least one non-zero entry"
            ),
            OmDecodeError::ReadOutOfBounds {
                dim,
                offset,
                count,
                bound,
            } => write!(
                f,
                "dimension {}: offset {} + count {} exceeds bound {}",
                dim, offset, count, bound
            ),
            OmDecodeError::ChunkIndexOutOfBounds { index, total_chunks } => write!(
                f,
                "chunk index {} is out of bounds (total_chunks = {})",
                index, total_chunks
            ),
            OmDecodeError::BitWidthExceedsElementWidth { bits, element_width } => write!(
                f,
                "bit width {} exceeds element width {}",
                bits, element_width
            ),
            OmDecodeError::TruncatedChunk { consumed, available } => write!(
                f,
                "chunk needs {} bytes but only {} were supplied",
                consumed, available
            ),
            OmDecodeError::NonMonotonicLut { index, prev, next } => write!(
                f,
                "LUT entry {} ({}) is smaller than entry {} ({})",
                index + 1,
                next,
                index,
                prev
            ),
            OmDecodeError::ScratchBufferTooSmall { needed, got } => write!(
                f,
                "scratch buffer too small: need at least {} bytes, got {}",
                needed, got
            ),
            OmDecodeError::OutputBufferTooSmall { needed, got } => write!(
                f,
                "output buffer too small: need at least {} bytes, got {}",
                needed, got
            ),
            OmDecodeError::OutputTypeMismatch { requested, got } => write!(
                f,
                "decoder configured for datatype {:?}, but decode_chunks was called with {:?}",
                requested, got
            ),
        }
    }
}

impl std::error::Error for OmDecodeError {}

pub type Result<T> = std::result::Result<T, OmDecodeError>;
