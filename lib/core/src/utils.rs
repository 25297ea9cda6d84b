/// Number of bits needed to write `value` in binary, at least one.
pub fn bit_width(value: usize) -> usize {
    (usize::BITS - value.leading_zeros()).max(1) as usize
}

/// MSB-first binary digits of `value`, zero-extended on the left to `width`.
///
/// # Panics
///
/// Panics if `value` does not fit into `width` bits.
pub fn to_bits(value: usize, width: usize) -> Vec<bool> {
    assert!(
        bit_width(value) <= width,
        "value {} does not fit into {} bits",
        value,
        width
    );
    (0..width).rev().map(|i| (value >> i) & 1 == 1).collect()
}
