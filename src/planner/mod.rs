//! Chunk-addressing planners: turn a read request plus a
//! LUT into a minimal stream of coalesced I/O instructions.
//!
//! Both planners share the same coalescing rule: a new
//! chunk is folded into the current instruction if the byte gap since
//! the current range's end is within `io_size_merge` and the resulting
//! total size stays within `io_size_max`; otherwise the current
//! instruction is emitted and a new one begins. They differ in what
//! "byte range of a chunk" means: the index planner works in LUT-block
//! byte space, which is known up front from `lut_chunk_length` and
//! `lut_chunk_element_count` alone (no decoding needed); the data
//! planner works in compressed-data byte space, which requires the
//! LUT to already be decoded.

mod data_read;
mod index_read;

pub use data_read::{init_data_read, next_data_read, DataReadState};
pub use index_read::{init_index_read, next_index_read, IndexReadState};
