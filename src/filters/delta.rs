use num_traits::{WrappingAdd, WrappingSub};

use super::{filtered_axes, for_each_axis_position};
use crate::geometry::row_major_strides;

fn decode_axis<T: WrappingAdd + Copy>(buf: &mut [T], shape: &[u64], strides: &[u64], axis: usize) {
    for_each_axis_position(shape, strides, axis, true, |pos, pred| {
        buf[pos] = buf[pos].wrapping_add(&buf[pred]);
    });
}

fn encode_axis<T: WrappingSub + Copy>(buf: &mut [T], shape: &[u64], strides: &[u64], axis: usize) {
    for_each_axis_position(shape, strides, axis, false, |pos, pred| {
        buf[pos] = buf[pos].wrapping_sub(&buf[pred]);
    });
}

/// Reverses the integer delta filter in place: every axis but the
/// last is turned from a per-step difference back into its running
/// sum, one axis at a time, outermost first.
pub fn decode_delta_nd<T: WrappingAdd + Copy>(buf: &mut [T], shape: &[u64]) {
    if shape.len() <= 1 {
        return;
    }
    let strides = row_major_strides(shape);
    for axis in filtered_axes(shape.len()) {
        decode_axis(buf, shape, &strides, axis);
    }
}

/// Applies the integer delta filter in place (used only to build test
/// fixtures; encoding is outside what this crate decodes).
pub fn encode_delta_nd<T: WrappingSub + Copy>(buf: &mut [T], shape: &[u64]) {
    if shape.len() <= 1 {
        return;
    }
    let strides = row_major_strides(shape);
    for axis in filtered_axes(shape.len()) {
        encode_axis(buf, shape, &strides, axis);
    }
}
