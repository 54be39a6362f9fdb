// SPDX-License-Identifier: MIT
//! # Vertical coordinator and vertical scaler
//!
//! [`YScaler`] is the streaming vertical coordinator: it owns a
//! [`ScanlineRing`] of already-horizontally-scaled rows and decides, for
//! each output row in turn, whether another input row must be pushed
//! before that output row can be produced. [`strip_scale`] is the
//! channel-agnostic vertical convolution that actually produces one output
//! row from an ordered window of input rows, and [`scale_plane_row`] is the
//! one-shot variant used when the whole input image already sits in
//! memory.

use crate::coeffs::{calc_coeffs, calc_taps, split_map};
use crate::error::Error;
use crate::fixed::{clamp_to_byte, Accum};
use crate::rbuf::ScanlineRing;

/// Vertical scaling convolution: given an ordered window of equal-length
/// rows and a sub-row offset `ty` in `[0, 1)`, produce one output row in
/// `out`.
///
/// Channel-agnostic: accumulates per *byte*, not per channel, so this one
/// loop works uniformly whether the underlying samples are 1, 3 or 4
/// channels wide (vertical interpolation is channel-separable at the byte
/// level).
pub fn strip_scale(window: &[&[u8]], ty: f32, out: &mut [u8]) -> Result<(), Error> {
    let taps = window.len() as u32;
    let len = window.first().map_or(0, |r| r.len());
    if out.len() < len {
        return Err(Error::BufferTooSmall { expected: len, actual: out.len() });
    }
    debug_assert!(window.iter().all(|r| r.len() == len));

    let mut coeffs = vec![0i32; taps as usize];
    calc_coeffs(&mut coeffs, ty, taps);

    for i in 0..len {
        let mut total: Accum = 0;
        for (row, &coeff) in window.iter().zip(coeffs.iter()) {
            total += coeff as Accum * row[i] as Accum;
        }
        out[i] = clamp_to_byte(total);
    }
    Ok(())
}

/// Streaming vertical coordinator.
///
/// Drives a [`ScanlineRing`] of horizontally-scaled rows: translates output
/// row requests into a demand stream for input rows (see
/// [`Self::needs_input`] / [`Self::push_next`]), and produces each output
/// row via [`strip_scale`] once enough rows are buffered (see
/// [`Self::scale`]).
#[derive(Debug)]
pub struct YScaler {
    ring: ScanlineRing,
    in_height: u32,
    out_height: u32,
    /// Newest input-row logical position the current output row's window
    /// is centered on.
    target: i64,
    /// Sub-row offset for the output row about to be produced.
    ty: f32,
    /// Output row index about to be produced.
    next_pos: u32,
}

impl YScaler {
    /// Create a coordinator for resampling `in_height` rows to
    /// `out_height` rows, where each (horizontally-scaled) row is
    /// `row_len` bytes.
    #[must_use]
    pub fn new(in_height: u32, out_height: u32, row_len: usize) -> Self {
        let taps = calc_taps(in_height, out_height) as u32;
        let mut ys = Self {
            ring: ScanlineRing::new(taps, row_len),
            in_height,
            out_height,
            target: 0,
            ty: 0.0,
            next_pos: 0,
        };
        ys.map_pos(0);
        ys
    }

    /// Vertical tap count in use (also the ring buffer's capacity).
    #[must_use]
    pub fn taps(&self) -> u32 {
        self.ring.height()
    }

    fn map_pos(&mut self, pos: u32) {
        let (smp_i, ty) = split_map(self.in_height, self.out_height, pos);
        self.target = smp_i as i64 + self.ring.height() as i64 / 2;
        self.ty = ty;
    }

    /// `true` once the buffered rows, and the input height, are enough to
    /// produce the output row currently at the front of the queue.
    #[must_use]
    pub fn ready(&self) -> bool {
        let count = self.ring.pushed();
        count == self.in_height || count as i64 > self.target
    }

    /// Return a writable slot for the next input row (already expected to
    /// be horizontally scaled to the output width), advancing the ring
    /// buffer's internal push counter. Only meaningful to call while
    /// [`Self::ready`] is `false`.
    pub fn push_next(&mut self) -> &mut [u8] {
        self.ring.push_next()
    }

    /// Output row index [`Self::scale`] will next produce.
    #[must_use]
    pub fn next_output_pos(&self) -> u32 {
        self.next_pos
    }

    /// Produce the next output row into `out`, using the currently
    /// buffered window and sub-row offset, then advance to the next output
    /// row's target/offset.
    ///
    /// Must only be called while [`Self::ready`] is `true`; a disciplined
    /// caller driving the buffer through [`Self::push_next`] first never
    /// violates this.
    pub fn scale(&mut self, out: &mut [u8]) -> Result<(), Error> {
        debug_assert!(self.ready(), "scale() called before enough rows were buffered");
        let window = self
            .ring
            .window(self.target)
            .expect("yscaler target always stays within the ring's reach by construction");
        strip_scale(&window, self.ty, out)?;
        self.next_pos += 1;
        self.map_pos(self.next_pos);
        Ok(())
    }
}

/// One-shot vertical scale for a single output row, given the entire input
/// image already resident in memory as `in_height` row slices.
///
/// Computes the vertical tap count, builds a clamped window of row
/// references around the target input row for output position `pos`, and
/// calls [`strip_scale`] directly — no ring buffer involved. Useful as a
/// correctness reference for the streaming path and for callers that
/// already have the whole image.
pub fn scale_plane_row(
    in_rows: &[&[u8]],
    in_height: u32,
    out_height: u32,
    pos: u32,
    out: &mut [u8],
) -> Result<(), Error> {
    if in_rows.len() != in_height as usize {
        return Err(Error::InvalidParameter("in_rows"));
    }
    let taps = calc_taps(in_height, out_height) as u32;
    let (smp_i, ty) = split_map(in_height, out_height, pos);
    let mut strip_pos = smp_i + 1 - (taps / 2) as i32;

    let mut window: Vec<&[u8]> = Vec::with_capacity(taps as usize);
    for _ in 0..taps {
        let row = if strip_pos < 0 {
            in_rows[0]
        } else if strip_pos as u32 > in_height - 1 {
            in_rows[in_height as usize - 1]
        } else {
            in_rows[strip_pos as usize]
        };
        window.push(row);
        strip_pos += 1;
    }

    strip_scale(&window, ty, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_scale_strip_reduces_to_pass_through() {
        let rows: [&[u8]; 4] = [&[0], &[1], &[42], &[3]];
        let mut out = [0u8; 1];
        // ty = 0 at 4 taps picks window[1] with weight 1.
        strip_scale(&rows, 0.0, &mut out).unwrap();
        assert_eq!(out[0], 42);
    }

    #[test]
    fn constant_window_is_preserved() {
        let rows: [&[u8]; 6] = [&[7], &[7], &[7], &[7], &[7], &[7]];
        for &ty in &[0.0, 0.25, 0.5, 0.75] {
            let mut out = [0u8; 1];
            strip_scale(&rows, ty, &mut out).unwrap();
            assert_eq!(out[0], 7);
        }
    }

    #[test]
    fn yscaler_feeds_exactly_enough_rows_then_emits() {
        let row_len = 1usize;
        let mut ys = YScaler::new(8, 8, row_len);
        assert!(!ys.ready());
        for v in 0..8u8 {
            assert!(!ys.ready());
            ys.push_next()[0] = v;
        }
        assert!(ys.ready());
        let mut out = [0u8; 1];
        ys.scale(&mut out).unwrap();
        assert_eq!(out[0], 0);
    }

    #[test]
    fn yscaler_drains_after_all_input_consumed() {
        let mut ys = YScaler::new(4, 2, 1);
        let mut fed = 0u8;
        let mut out = [0u8; 1];
        for _ in 0..2u32 {
            while !ys.ready() {
                ys.push_next()[0] = fed;
                fed += 1;
            }
            ys.scale(&mut out).unwrap();
        }
        assert_eq!(fed, 4);
    }

    #[test]
    fn scale_plane_row_matches_streaming_for_identity() {
        let data: [u8; 4] = [10, 20, 30, 40];
        let rows: Vec<&[u8]> = data.iter().map(std::slice::from_ref).collect();
        let mut out = [0u8; 1];
        scale_plane_row(&rows, 4, 4, 1, &mut out).unwrap();
        assert_eq!(out[0], 20);
    }
}
