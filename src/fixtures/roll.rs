//! Deterministic pseudo-random rolls keyed by string ids.

/// 32-bit rolling hash over the UTF-16 code units of `s`.
///
/// Computes `h = h * 31 + unit` with two's-complement wraparound and returns
/// the absolute value of the final signed hash.
pub fn string_hash(s: &str) -> u32 {
    let hash = s
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hash.unsigned_abs()
}

/// `string_hash(id) % modulus`. A zero modulus rolls 0.
pub fn deterministic_roll(id: &str, modulus: u32) -> u32 {
    string_hash(id).checked_rem(modulus).unwrap_or(0)
}
