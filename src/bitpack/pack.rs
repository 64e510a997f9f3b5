use crate::bitpack::LaneWidth;

/// Appends `values.len()` values, each truncated to its low `b` bits,
/// to `dst` as a fixed-width bit-packed stream.
///
/// This is the inverse of [`super::unpack`], used only to build
/// fixtures for tests: writing chunk payloads is outside what this
/// crate decodes.
pub fn pack<T: LaneWidth>(values: &[u64], b: u8, dst: &mut Vec<u8>) {
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

    let consumed_bytes = ((total_bits + 7) / 8) as usize;
    let consumed_words = (consumed_bytes + 7) / 8;
    for w in &words[..consumed_words.max(1).min(words.len())] {
        dst.extend_from_slice(&w.to_le_bytes());
    }
}

/// Encodes `values` as successive differences (inverse of
/// [`super::unpack_delta`]) and bit-packs the residuals.
pub fn pack_delta<T: LaneWidth>(values: &[u64], b: u8, dst: &mut Vec<u8>) {
    let mut residuals = Vec::with_capacity(values.len());
    let mut prev = 0u64;
    for &v in values {
        residuals.push(v.wrapping_sub(prev));
        prev = v;
    }
    pack::<T>(&residuals, b, dst);
}
