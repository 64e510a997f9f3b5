//! Decode engine for chunked, bit-packed N-dimensional array storage used
//! for gridded scientific data (temperature fields, weather forecasts,
//! reanalysis grids).
//!
//! The crate does not open files, fetch HTTP ranges, or otherwise perform
//! I/O itself: [`OmDecoder`] is a planner and a decompressor. A caller
//! drives it through an iterator-style protocol — pull an instruction,
//! execute the read with whatever transport it likes, hand the bytes
//! back — until the request is exhausted.
//!
//! # Example
//!
//! ```
//! use omchunk::{CompressionType, DataType, OmDecoder};
//!
//! # fn fetch(_offset: u64, _count: u64) -> Vec<u8> { vec![] }
//! let dims = [100u64, 100];
//! let chunks = [10u64, 10];
//! let read_offset = [25u64, 25];
//! let read_count = [5u64, 5];
//!
//! let decoder = OmDecoder::new(
//!     &dims, &chunks,
//!     &read_offset, &read_count,
//!     &read_offset, &dims,
//!     100.0,
//!     CompressionType::LinearQuantized16Bit,
//!     DataType::Float,
//!     /* lut_chunk_length */ 256,
//!     /* lut_chunk_element_count */ 64,
//!     /* lut_start */ 0,
//!     /* io_size_merge */ 512,
//!     /* io_size_max */ 1 << 20,
//! ).unwrap();
//!
//! let mut output = vec![0f32; (dims[0] * dims[1]) as usize];
//! let mut scratch = vec![0u8; decoder.read_buffer_size()];
//!
//! let mut index_state = decoder.init_index_read();
//! while decoder.next_index_read(&mut index_state) {
//!     // let lut_bytes = io.read(index_state.offset, index_state.count);
//!     # let lut_bytes: Vec<u8> = vec![];
//!     let mut data_state = decoder.init_data_read(&index_state);
//!     while decoder.next_data_read(&mut data_state, &lut_bytes).unwrap_or(false) {
//!         // let data = io.read(data_state.offset, data_state.count);
//!         // decoder.decode_chunks(data_state.chunk_lower, data_state.chunk_upper,
//!         //                        &data, &mut output, &mut scratch).unwrap();
//!     }
//! }
//! ```

mod bitpack;
mod chunk_decoder;
mod filters;
mod geometry;
mod lut;
mod scale;
mod scatter;

pub mod compression;
pub mod datatype;
pub mod decoder;
pub mod errors;
pub mod packers;
pub mod planner;

pub use compression::CompressionType;
pub use datatype::{DataType, OutputElement};
pub use decoder::OmDecoder;
pub use errors::OmDecodeError;
pub use planner::{DataReadState, IndexReadState};
