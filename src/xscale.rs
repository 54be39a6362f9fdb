// SPDX-License-Identifier: MIT
//! # Horizontal scaler
//!
//! Resamples one input scanline to one output scanline of a different
//! width, for 1-4 interleaved 8-bit channels per sample. A single generic,
//! channel-count-agnostic inner loop handles all component counts; a
//! 4-channel-specialized fast path (packed `u32` samples) is possible but
//! not implemented here, since it changes nothing observable.

use crate::coeffs::{calc_coeffs, calc_taps, split_map};
use crate::error::Error;
use crate::fixed::{clamp_to_byte, Accum};
use crate::padded::{pad_extend_edges, padded_row_len_offset};

/// Greatest common divisor, used to find the periodicity of the sub-pixel
/// offset across an output row (see [`xscale_padded`]'s GCD stride reuse).
fn gcd(mut a: u32, mut b: u32) -> u32 {
    while a != 0 {
        let c = a;
        a = b % a;
        b = c;
    }
    b
}

/// Resample a padded scanline to `out`.
///
/// `padded` is the full padded buffer as sized by
/// [`crate::padded::padded_row_len_offset`], already edge-extended via
/// [`crate::padded::pad_extend_edges`]; `offset` is the byte offset within
/// it at which the `in_width`-sample logical row begins. The kernel window
/// can reach left of that row into the padding, i.e. to negative sample
/// positions relative to it — safe Rust slices can't be indexed with a
/// negative offset, so the offset into the padded buffer is threaded
/// through explicitly instead of working from a pointer pre-advanced to
/// the logical row's start.
///
/// Exploits the periodicity of the sub-pixel offset: letting `g =
/// gcd(in_width, out_width)`, output positions `p` and `p + out_width/g`
/// share the same sub-pixel offset and hence the same coefficients, so
/// coefficients are computed only `out_width/g` times per row rather than
/// once per output sample.
pub fn xscale_padded(
    padded: &[u8],
    offset: usize,
    in_width: u32,
    out: &mut [u8],
    out_width: u32,
    components: u8,
) -> Result<(), Error> {
    if in_width == 0 {
        return Err(Error::InvalidParameter("in_width"));
    }
    if out_width == 0 {
        return Err(Error::InvalidParameter("out_width"));
    }
    if components == 0 || components > 4 {
        return Err(Error::InvalidParameter("components"));
    }
    let cmp = components as usize;
    let required = out_width as usize * cmp;
    if out.len() < required {
        return Err(Error::BufferTooSmall { expected: required, actual: out.len() });
    }

    let taps = calc_taps(in_width, out_width) as u32;
    let mut coeffs = vec![0i32; taps as usize];

    let scale_gcd = gcd(in_width, out_width);
    let in_chunk = in_width / scale_gcd;
    let out_chunk = out_width / scale_gcd;

    for i in 0..out_chunk {
        let (smp_i, tx) = split_map(in_width, out_width, i);
        calc_coeffs(&mut coeffs, tx, taps);

        let mut xsmp_i = smp_i as i64 + 1 - (taps / 2) as i64;
        let mut out_pos = i as usize * cmp;
        for _ in 0..scale_gcd {
            let base = offset as i64 + xsmp_i * cmp as i64;
            for c in 0..cmp {
                let mut total: Accum = 0;
                for (t, &coeff) in coeffs.iter().enumerate() {
                    let idx = (base + t as i64 * cmp as i64 + c as i64) as usize;
                    total += coeff as Accum * padded[idx] as Accum;
                }
                out[out_pos + c] = clamp_to_byte(total);
            }
            out_pos += out_chunk as usize * cmp;
            xsmp_i += in_chunk as i64;
        }
    }

    Ok(())
}

/// Resample one input scanline of `in_width` samples to one output scanline
/// of `out_width` samples, `components` channels each.
///
/// Allocates a padded scanline internally (see [`crate::padded`]), fills it
/// from `input` with edges replicated, and delegates to [`xscale_padded`].
/// Callers that resample many rows at the same dimensions should prefer
/// managing their own padded buffer and calling `xscale_padded` directly to
/// avoid the per-row allocation.
pub fn xscale(
    input: &[u8],
    in_width: u32,
    out: &mut [u8],
    out_width: u32,
    components: u8,
) -> Result<(), Error> {
    if in_width == 0 {
        return Err(Error::InvalidParameter("in_width"));
    }
    if out_width == 0 {
        return Err(Error::InvalidParameter("out_width"));
    }
    if components == 0 || components > 4 {
        return Err(Error::InvalidParameter("components"));
    }
    let cmp = components as usize;
    let required_in = in_width as usize * cmp;
    if input.len() < required_in {
        return Err(Error::BufferTooSmall { expected: required_in, actual: input.len() });
    }

    let (len, offset) = padded_row_len_offset(in_width, out_width, components);
    let mut padded = vec![0u8; len];
    padded[offset..offset + required_in].copy_from_slice(&input[..required_in]);
    pad_extend_edges(&mut padded, in_width, offset, components);

    xscale_padded(&padded, offset, in_width, out, out_width, components)
}
