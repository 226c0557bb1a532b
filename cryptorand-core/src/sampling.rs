//! Mapping raw secure bytes onto bounded ranges without modulo bias.

use crate::error::Result;
use crate::traits::random::SecureRandom;

/// 2^53, the number of distinct unit floats produced by [`unit_f64`].
const UNIT_SCALE: f64 = (1u64 << 53) as f64;

/// Uniform integer in `[0, bound)`.
///
/// Draws 64-bit words and rejects those below `2^64 mod bound`, leaving a
/// zone whose size is an exact multiple of `bound`. Each draw is accepted
/// with probability above one half.
pub fn below(rng: &dyn SecureRandom, bound: u64) -> Result<u64> {
    debug_assert!(bound > 0, "bound must be non-zero");
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let x = rng.next_u64()?;
        if x >= threshold {
            return Ok(x % bound);
        }
    }
}

/// Uniform index in `[0, len)`.
pub fn index(rng: &dyn SecureRandom, len: usize) -> Result<usize> {
    Ok(below(rng, len as u64)? as usize)
}

/// Uniform integer in the inclusive range `[min, max]`. Requires `min <= max`.
///
/// The span is computed in 128-bit arithmetic so the full `i64` range works.
pub fn range_inclusive(rng: &dyn SecureRandom, min: i64, max: i64) -> Result<i64> {
    debug_assert!(min <= max);
    let span = (max as i128 - min as i128) as u128 + 1;
    let offset = if span > u64::MAX as u128 {
        rng.next_u64()?
    } else {
        below(rng, span as u64)?
    };
    Ok((min as i128 + offset as i128) as i64)
}

/// Uniform float in `[0, 1)` with 53 bits of resolution.
pub fn unit_f64(rng: &dyn SecureRandom) -> Result<f64> {
    Ok((rng.next_u64()? >> 11) as f64 / UNIT_SCALE)
}

/// Selects `count` distinct positions out of `len` with a partial
/// Fisher-Yates shuffle. Requires `count <= len`.
pub fn sample_indices(rng: &dyn SecureRandom, len: usize, count: usize) -> Result<Vec<usize>> {
    debug_assert!(count <= len);
    let mut pool: Vec<usize> = (0..len).collect();
    for i in 0..count {
        let j = i + index(rng, len - i)?;
        pool.swap(i, j);
    }
    pool.truncate(count);
    Ok(pool)
}
