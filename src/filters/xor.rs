use super::{filtered_axes, for_each_axis_position};
use crate::geometry::row_major_strides;

/// A floating-point type whose IEEE bit pattern can be xor-folded with
/// its predecessor along an axis, the same way the source reinterprets
/// `float*`/`double*` as `int32_t*`/`int64_t*`.
pub trait XorBits: Copy {
    type Bits: Copy + std::ops::BitXor<Output = Self::Bits>;
    fn to_xor_bits(self) -> Self::Bits;
    fn from_xor_bits(bits: Self::Bits) -> Self;
}

impl XorBits for f32 {
    type Bits = u32;
    fn to_xor_bits(self) -> u32 {
        self.to_bits()
    }
    fn from_xor_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
}

impl XorBits for f64 {
    type Bits = u64;
    fn to_xor_bits(self) -> u64 {
        self.to_bits()
    }
    fn from_xor_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

fn fold_axis<T: XorBits>(buf: &mut [T], shape: &[u64], strides: &[u64], axis: usize, ascending: bool) {
    for_each_axis_position(shape, strides, axis, ascending, |pos, pred| {
        let folded = buf[pos].to_xor_bits() ^ buf[pred].to_xor_bits();
        buf[pos] = T::from_xor_bits(folded);
    });
}

/// Reverses the XOR filter in place: every axis but the last has its
/// bit pattern un-xored with its predecessor, outermost axis first.
/// XOR is its own inverse, so this is identical in shape to
/// [`encode_xor_nd`] save for the traversal direction.
pub fn decode_xor_nd<T: XorBits>(buf: &mut [T], shape: &[u64]) {
    if shape.len() <= 1 {
        return;
    }
    let strides = row_major_strides(shape);
    for axis in filtered_axes(shape.len()) {
        fold_axis(buf, shape, &strides, axis, true);
    }
}

/// Applies the XOR filter in place (used only to build test fixtures).
pub fn encode_xor_nd<T: XorBits>(buf: &mut [T], shape: &[u64]) {
    if shape.len() <= 1 {
        return;
    }
    let strides = row_major_strides(shape);
    for axis in filtered_axes(shape.len()) {
        fold_axis(buf, shape, &strides, axis, false);
    }
}
