#[macro_use]
extern crate criterion;
extern crate omchunk;

use criterion::{black_box, Criterion};
use omchunk::{CompressionType, DataType, OmDecoder};

/// Bit-packs `values` at width `b`, little-endian, matching the layout
/// `chunk_decoder` expects after a one-byte header.
fn pack(values: &[u64], b: u8, dst: &mut Vec<u8>) {
    if b == 0 {
        return;
    }
    let mask = if b == 64 { u64::MAX } else { (1u64 << b) - 1 };
    let total_bits = values.len() as u64 * b as u64;
    let total_words = ((total_bits + 63) / 64) as usize + 1;
    let mut words = vec![0u64; total_words];
    for (i, &raw) in values.iter().enumerate() {
        let value = raw & mask;
        let bit_pos = i as u64 * b as u64;
        let word_idx = (bit_pos / 64) as usize;
        let bit_off = bit_pos % 64;
        words[word_idx] |= value << bit_off;
        if bit_off + b as u64 > 64 {
            words[word_idx + 1] |= value >> (64 - bit_off);
        }
    }
    let consumed_words = (((total_bits + 7) / 8) as usize + 7) / 8;
    for w in &words[..consumed_words.max(1).min(words.len())] {
        dst.extend_from_slice(&w.to_le_bytes());
    }
}

fn row_major_strides(shape: &[u64]) -> Vec<u64> {
    let n = shape.len();
    let mut strides = vec![1u64; n];
    for i in (0..n.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

fn encode_delta_nd(buf: &mut [i16], shape: &[u64]) {
    if shape.len() <= 1 {
        return;
    }
    let strides = row_major_strides(shape);
    for axis in 0..shape.len() - 1 {
        let total: u64 = shape.iter().product();
        let stride = strides[axis];
        let extent = shape[axis];
        for pos in (0..total).rev() {
            let coord = (pos / stride) % extent;
            if coord != 0 {
                let pred = (pos - stride) as usize;
                buf[pos as usize] = buf[pos as usize].wrapping_sub(buf[pred]);
            }
        }
    }
}

/// Builds one 64x64 linear-quantized chunk's compressed bytes: a
/// single-byte bit-width header followed by the delta-filtered,
/// bit-packed i16 body, padded for the unpacker's word-aligned overread.
fn build_linear_chunk(side: u64) -> (Vec<u64>, Vec<u8>) {
    let shape = vec![side, side];
    let n = (side * side) as usize;
    let mut stored: Vec<i16> = (0..n).map(|i| (i % 4096) as i16).collect();
    encode_delta_nd(&mut stored, &shape);
    let raw: Vec<u64> = stored.iter().map(|&v| (v as u16) as u64).collect();
    let mut blob = vec![16u8];
    pack(&raw, 16, &mut blob);
    blob.resize(blob.len() + 8, 0);
    (shape, blob)
}

const CHUNK_SIDE: u64 = 64;
const CHUNK_DIMS: [u64; 2] = [CHUNK_SIDE, CHUNK_SIDE];
const CHUNK_OFFSET: [u64; 2] = [0, 0];

fn decode_single_chunk_benchmark(c: &mut Criterion) {
    let (_shape, blob) = build_linear_chunk(CHUNK_SIDE);

    let decoder = OmDecoder::new(
        &CHUNK_DIMS,
        &CHUNK_DIMS,
        &CHUNK_OFFSET,
        &CHUNK_DIMS,
        &CHUNK_OFFSET,
        &CHUNK_DIMS,
        1.0,
        CompressionType::LinearQuantized16Bit,
        DataType::Float,
        4096,
        2,
        0,
        1_000_000,
        1_000_000,
    )
    .unwrap();

    let mut output = vec![0f32; (CHUNK_SIDE * CHUNK_SIDE) as usize];
    let mut scratch = vec![0u8; decoder.read_buffer_size()];

    c.bench_function("decode_chunk_linear_64x64", move |b| {
        b.iter(|| {
            decoder
                .decode_chunks(0, 0, black_box(&blob), &mut output, &mut scratch)
                .unwrap();
        })
    });
}

const GRID_DIMS: [u64; 2] = [1000, 1000];
const GRID_CHUNKS: [u64; 2] = [10, 10];
const GRID_READ_OFFSET: [u64; 2] = [5, 5];
const GRID_READ_COUNT: [u64; 2] = [800, 800];

fn planner_coalescing_benchmark(c: &mut Criterion) {
    let decoder = OmDecoder::new(
        &GRID_DIMS,
        &GRID_CHUNKS,
        &GRID_READ_OFFSET,
        &GRID_READ_COUNT,
        &GRID_READ_OFFSET,
        &GRID_DIMS,
        1.0,
        CompressionType::LinearQuantized16Bit,
        DataType::Float,
        4096,
        64,
        0,
        4096,
        1 << 20,
    )
    .unwrap();

    c.bench_function("index_read_coalescing_800x800_over_1000x1000", move |b| {
        b.iter(|| {
            let mut state = decoder.init_index_read();
            let mut instructions = 0u32;
            while decoder.next_index_read(&mut state) {
                instructions += 1;
            }
            black_box(instructions)
        })
    });
}

criterion_group!(decode_engine, decode_single_chunk_benchmark, planner_coalescing_benchmark);
criterion_main!(decode_engine);
