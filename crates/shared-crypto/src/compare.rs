//! Constant-time comparison.

use subtle::ConstantTimeEq;

/// Compares two byte strings without an early exit on the first mismatch.
///
/// Lengths are not secret: inputs of different length compare unequal
/// immediately.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
