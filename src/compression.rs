//! The fixed set of compression schemes a chunk may be stored with.
//!
//! Mirrors `om_compression_t` from the original decoder header: three
//! schemes, with discriminant `2` left unassigned exactly as in the
//! source enum (kept as a gap rather than renumbered, see DESIGN.md).

/// How a chunk's integer payload maps back to the logical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// Lossy: scale to `i16`, 2-D/N-D integer delta filter, bit-pack.
    LinearQuantized16Bit = 0,
    /// Lossless: raw `f32` bit pattern, 2-D/N-D XOR filter, bit-pack.
    XorFloat32 = 1,
    /// Like [`CompressionType::LinearQuantized16Bit`] but `log10(1+x)`
    /// is applied before scaling.
    LogQuantized16Bit = 3,
}

impl CompressionType {
    /// Width, in bytes, of the integer representation the chunk is
    /// physically stored as before bit-packing.
    pub fn stored_element_width(self) -> usize {
        match self {
            CompressionType::LinearQuantized16Bit | CompressionType::LogQuantized16Bit => 2,
            CompressionType::XorFloat32 => 4,
        }
    }

    /// Width, in bits, of the stored element (used to bound the
    /// per-chunk bit count `b`).
    pub fn stored_element_bits(self) -> u8 {
        (self.stored_element_width() * 8) as u8
    }

    /// Whether the inverse filter is an integer delta (true) or an IEEE
    /// bit-pattern XOR (false).
    pub fn uses_delta_filter(self) -> bool {
        matches!(
            self,
            CompressionType::LinearQuantized16Bit | CompressionType::LogQuantized16Bit
        )
    }

    pub fn is_logarithmic(self) -> bool {
        matches!(self, CompressionType::LogQuantized16Bit)
    }
}
