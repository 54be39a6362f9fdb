// SPDX-License-Identifier: MIT
//! # Fixed-point formats
//!
//! The engine accumulates weighted sums of byte samples in fixed point rather
//! than floating point so that output is reproducible bit-for-bit across
//! platforms and compilers. Two formats are used:
//!
//! - [`Coeff`]: a 1.30 signed fixed-point kernel weight, range `[-2, 2)`.
//! - [`Accum`]: a 33.30 signed fixed-point accumulator, wide enough to sum a
//!   few thousand `coeff * byte` products without overflow.
//!
//! The rounding bias applied in [`clamp_to_byte`] (`TOPOFF`) is calibrated
//! against a floating-point reference implementation; it must be used
//! exactly as specified to reproduce reference output byte-for-byte.

/// A kernel coefficient in 1.30 fixed point: 1 integer bit, 30 fractional
/// bits, range `[-2, 2)`. One unit is `2^30`.
pub type Coeff = i32;

/// One unit of [`Coeff`] (`2^30`).
pub const ONE_COEFF: Coeff = 1 << 30;

/// A weighted-sum accumulator in 33.30 fixed point: signed 64-bit, 33
/// integer bits, 30 fractional bits. Holds the sum of up to a few thousand
/// `Coeff * u8` products without overflow.
pub type Accum = i64;

/// Rounding bias added before truncation, calibrated against a
/// floating-point reference implementation to minimize deviation from it.
/// Must be used exactly as specified to reproduce reference output
/// bit-for-bit.
const TOPOFF: Accum = 8192;

/// Round-half-up bias: `0.5` in 33.30 fixed point.
const HALF: Accum = 1 << 29;

/// Bit that, once set after adding the rounding bias, indicates the
/// accumulator has overflowed past 255 and must clamp to the top of the
/// byte range.
const OVERFLOW_BIT: Accum = 1 << 38;

/// Convert a floating-point weight `w` in `[-1, 1]` to [`Coeff`] fixed point.
#[inline]
#[must_use]
pub fn coeff_from_f32(w: f32) -> Coeff {
    (w * ONE_COEFF as f32).round() as Coeff
}

/// Round, bias and clamp an [`Accum`] value to a byte.
///
/// Negative values clamp to 0. Values whose rounded, biased representation
/// sets bit 38 clamp to 255. Otherwise the value is rounded half-up (with an
/// additional [`TOPOFF`] bias) and truncated to its integer part.
#[inline]
#[must_use]
pub fn clamp_to_byte(mut x: Accum) -> u8 {
    if x < 0 {
        return 0;
    }
    x += HALF + TOPOFF;
    if x & OVERFLOW_BIT != 0 {
        return 255;
    }
    (x >> 30) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coeff_round_trip_is_within_one_unit() {
        for &w in &[-1.0_f32, -0.5, 0.0, 0.25, 0.9999, 1.0] {
            let c = coeff_from_f32(w);
            let back = c as f32 / ONE_COEFF as f32;
            assert!((back - w).abs() < 1.0 / ONE_COEFF as f32 + 1e-6);
        }
    }

    #[test]
    fn clamp_zero_coefficient_zero_sample_is_zero() {
        assert_eq!(clamp_to_byte(0), 0);
    }

    #[test]
    fn clamp_negative_clamps_to_zero() {
        assert_eq!(clamp_to_byte(-1), 0);
        assert_eq!(clamp_to_byte(-(1 << 40)), 0);
    }

    #[test]
    fn clamp_identity_weight_reproduces_byte() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let acc = (v as Accum) << 30;
            assert_eq!(clamp_to_byte(acc), v);
        }
    }

    #[test]
    fn clamp_overflow_saturates_to_255() {
        let acc = (300_i64) << 30;
        assert_eq!(clamp_to_byte(acc), 255);
    }

    #[test]
    fn clamp_rounds_half_up() {
        // 127.5 in 33.30 fixed point should round to 128, not 127.
        let acc = (127_i64 << 30) + (1 << 29);
        assert_eq!(clamp_to_byte(acc), 128);
    }
}
