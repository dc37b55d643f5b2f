//! The stereo beat generator.
//!
//! Two free-running sine oscillators, one per ear, at independently settable
//! frequencies. The perceived binaural beat is the difference between them.
//!
//! Realtime contract:
//! - No heap, no locks, no I/O anywhere in the render path
//! - Phase is continuous across `render` calls: the end phase of one block is
//!   exactly the start phase of the next
//! - Parameters are taken per call and held for the whole block; the caller
//!   latches one snapshot per processing callback
//! - Nothing here panics for any parameter or buffer shape

use crate::dsp::{self, TAU};
use crate::params::BeatParams;

/// Free-running stereo sine pair with per-channel phase accumulators.
///
/// Both phases live in `[0, 2π)`. After each per-sample advance the phase is
/// wrapped by a **single conditional subtraction** of 2π, never a general
/// modulo: per-sample increments stay well below 2π for the whole supported
/// frequency domain (`f < sr`), and the one-subtraction wrap is part of the
/// observable floating-point contract.
#[derive(Copy, Clone, Debug)]
pub struct StereoBeat {
    phase_l: f32, // [0, 2π)
    phase_r: f32, // [0, 2π)
    sr: f32,      // fixed per instance, > 0
}

impl StereoBeat {
    /// Create a generator for the host's sample rate. Phases start at 0.
    #[inline]
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase_l: 0.0,
            phase_r: 0.0,
            sr: sample_rate.max(1.0),
        }
    }

    /// Re-arm for a (possibly new) sample rate. Phases return to 0, matching
    /// a host teardown/restart; persisting phase across restarts is the
    /// host's business.
    #[inline]
    pub fn reset(&mut self, sample_rate: f32) {
        self.sr = sample_rate.max(1.0);
        self.phase_l = 0.0;
        self.phase_r = 0.0;
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sr
    }

    /// Current phase pair in radians, each in `[0, 2π)`.
    #[inline]
    pub fn phases(&self) -> (f32, f32) {
        (self.phase_l, self.phase_r)
    }

    /// Produce one stereo frame and advance both phases.
    ///
    /// `params` must already be clamped ([`BeatParams::clamped`]); this is the
    /// per-sample hot path and revalidates nothing.
    #[inline]
    pub fn next_frame(&mut self, params: &BeatParams) -> (f32, f32) {
        let l = dsp::sin(self.phase_l) * params.gain;
        let r = dsp::sin(self.phase_r) * params.gain;

        self.phase_l += TAU * params.left_hz / self.sr;
        if self.phase_l >= TAU {
            self.phase_l -= TAU;
        }
        self.phase_r += TAU * params.right_hz / self.sr;
        if self.phase_r >= TAU {
            self.phase_r -= TAU;
        }

        (l, r)
    }

    /// Fill both channel slices with one block of samples.
    ///
    /// Processes `min(left.len(), right.len())` frames; the host hands equal
    /// lengths in practice. One parameter snapshot covers the whole block.
    #[inline]
    pub fn render(&mut self, params: &BeatParams, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (sl, sr_) = self.next_frame(params);
            *l = sl;
            *r = sr_;
        }
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    fn params(left: f32, right: f32, gain: f32) -> BeatParams {
        BeatParams::new(left, right, gain)
    }

    // approximating math backends loosen the reference-comparison tolerances
    fn tol(tight: f32) -> f32 {
        if cfg!(any(feature = "fast-math", feature = "micromath")) {
            5e-3
        } else {
            tight
        }
    }

    #[test]
    fn split_blocks_match_one_block_exactly() {
        let p = params(250.0, 260.0, 0.5);

        // one 480-frame block
        let mut whole = StereoBeat::new(SR);
        let mut wl = [0.0f32; 480];
        let mut wr = [0.0f32; 480];
        whole.render(&p, &mut wl, &mut wr);

        // 137 + 343 frames across two calls, same generator
        let mut split = StereoBeat::new(SR);
        let mut sl = [0.0f32; 480];
        let mut sr_ = [0.0f32; 480];
        let (sl_a, sl_b) = sl.split_at_mut(137);
        let (sr_a, sr_b) = sr_.split_at_mut(137);
        split.render(&p, sl_a, sr_a);
        split.render(&p, sl_b, sr_b);

        // identical op sequence → bit-identical output
        assert_eq!(wl[..], sl[..]);
        assert_eq!(wr[..], sr_[..]);
        assert_eq!(whole.phases(), split.phases());
    }

    #[test]
    fn zero_length_blocks_are_harmless() {
        let p = params(250.0, 260.0, 0.5);
        let mut gen = StereoBeat::new(SR);
        gen.render(&p, &mut [], &mut []);
        assert_eq!(gen.phases(), (0.0, 0.0));
    }

    #[test]
    fn left_tracks_reference_sine() {
        let p = params(250.0, 260.0, 1.0);
        let mut gen = StereoBeat::new(SR);
        let mut l = [0.0f32; 480];
        let mut r = [0.0f32; 480];
        gen.render(&p, &mut l, &mut r);

        for (i, &got) in l.iter().enumerate() {
            let want = (core::f64::consts::TAU * 250.0 * i as f64 / f64::from(SR)).sin() as f32;
            // f32 phase accumulation drifts slowly; 1e-3 abs over 10 ms is generous
            assert!((got - want).abs() < tol(1e-3), "i={} got={} want={}", i, got, want);
        }
    }

    #[test]
    fn gain_scales_linearly_and_zero_gain_is_silence() {
        let mut unity = StereoBeat::new(SR);
        let mut half = StereoBeat::new(SR);
        let mut mute = StereoBeat::new(SR);
        let mut ul = [0.0f32; 960];
        let mut ur = [0.0f32; 960];
        let mut hl = [0.0f32; 960];
        let mut hr = [0.0f32; 960];
        let mut ml = [7.0f32; 960];
        let mut mr = [7.0f32; 960];

        unity.render(&params(250.0, 260.0, 1.0), &mut ul, &mut ur);
        half.render(&params(250.0, 260.0, 0.5), &mut hl, &mut hr);
        mute.render(&params(250.0, 260.0, 0.0), &mut ml, &mut mr);

        for i in 0..960 {
            // 0.5 is a power of two: scaling is exact in f32
            assert_eq!(hl[i], ul[i] * 0.5, "i={}", i);
            assert_eq!(hr[i], ur[i] * 0.5, "i={}", i);
            assert_eq!(ml[i], 0.0, "i={}", i);
            assert_eq!(mr[i], 0.0, "i={}", i);
        }
    }

    #[test]
    fn unity_gain_reaches_full_scale_peak() {
        // one full second at 250 Hz: plenty of near-peak samples
        let p = params(250.0, 260.0, 1.0);
        let mut gen = StereoBeat::new(SR);
        let mut peak = 0.0f32;
        let mut l = [0.0f32; 480];
        let mut r = [0.0f32; 480];
        for _ in 0..100 {
            gen.render(&p, &mut l, &mut r);
            for &s in &l {
                peak = peak.max(s.abs());
            }
        }
        assert!(peak > 1.0 - tol(1e-3) && peak <= 1.0 + tol(1e-6), "peak={}", peak);
    }

    #[test]
    fn right_frequency_does_not_affect_left_channel() {
        let mut a = StereoBeat::new(SR);
        let mut b = StereoBeat::new(SR);
        let mut al = [0.0f32; 480];
        let mut ar = [0.0f32; 480];
        let mut bl = [0.0f32; 480];
        let mut br = [0.0f32; 480];

        a.render(&params(250.0, 260.0, 0.5), &mut al, &mut ar);
        b.render(&params(250.0, 1000.0, 0.5), &mut bl, &mut br);

        assert_eq!(al[..], bl[..]);
        assert_ne!(ar[..], br[..]);
    }

    #[test]
    fn clamped_params_behave_as_boundary_values() {
        let mut neg = StereoBeat::new(SR);
        let mut zero = StereoBeat::new(SR);
        let mut nl = [0.0f32; 64];
        let mut nr = [0.0f32; 64];
        let mut zl = [0.0f32; 64];
        let mut zr = [0.0f32; 64];

        neg.render(&params(-5.0, 260.0, 0.5), &mut nl, &mut nr);
        zero.render(&params(0.0, 260.0, 0.5), &mut zl, &mut zr);
        assert_eq!(nl[..], zl[..]);

        let mut hot = StereoBeat::new(SR);
        let mut one = StereoBeat::new(SR);
        let mut hl = [0.0f32; 64];
        let mut hr = [0.0f32; 64];
        let mut ol = [0.0f32; 64];
        let mut or_ = [0.0f32; 64];
        hot.render(&params(250.0, 260.0, 1.5), &mut hl, &mut hr);
        one.render(&params(250.0, 260.0, 1.0), &mut ol, &mut or_);
        assert_eq!(hl[..], ol[..]);
    }

    #[test]
    fn zero_frequency_holds_phase_and_emits_dc_zero() {
        let p = params(0.0, 0.0, 1.0);
        let mut gen = StereoBeat::new(SR);
        let mut l = [9.0f32; 256];
        let mut r = [9.0f32; 256];
        gen.render(&p, &mut l, &mut r);
        assert!(l.iter().all(|&s| s == 0.0));
        assert!(r.iter().all(|&s| s == 0.0));
        assert_eq!(gen.phases(), (0.0, 0.0));
    }

    #[test]
    fn phases_stay_wrapped_at_top_of_domain() {
        // 20 kHz at 48 kHz: increment ≈ 2.618 rad per sample, worst case in domain
        let p = params(20_000.0, 20_000.0, 0.1);
        let mut gen = StereoBeat::new(SR);
        let mut l = [0.0f32; 480];
        let mut r = [0.0f32; 480];
        for _ in 0..200 {
            gen.render(&p, &mut l, &mut r);
            let (pl, pr) = gen.phases();
            assert!((0.0..TAU).contains(&pl), "phase_l={}", pl);
            assert!((0.0..TAU).contains(&pr), "phase_r={}", pr);
        }
    }

    #[test]
    fn ten_ms_block_scenario_at_48k() {
        // sr=48000, 250/260 Hz, gain 0.5, N=480 (10 ms)
        let p = params(250.0, 260.0, 0.5);
        let mut gen = StereoBeat::new(SR);
        let mut l = [0.0f32; 480];
        let mut r = [0.0f32; 480];
        gen.render(&p, &mut l, &mut r);

        assert_eq!(l[0], 0.0);
        assert_eq!(r[0], 0.0);

        let want_l1 = (TAU * 250.0 / SR).sin() * 0.5; // ≈ 0.01636
        let want_r1 = (TAU * 260.0 / SR).sin() * 0.5;
        assert!((l[1] - want_l1).abs() < tol(1e-6), "l[1]={} want={}", l[1], want_l1);
        assert!((r[1] - want_r1).abs() < tol(1e-6), "r[1]={} want={}", r[1], want_r1);
    }

    #[test]
    fn left_cycle_closes_after_one_second() {
        // 250 Hz divides 48 kHz: after 48000 samples the left phase has
        // advanced by exactly 250 cycles, so the wrapped phase is ~0 again.
        // Modular check, not exact float equality.
        let p = params(250.0, 260.0, 0.5);
        let mut gen = StereoBeat::new(SR);
        let mut l = [0.0f32; 480];
        let mut r = [0.0f32; 480];
        for _ in 0..100 {
            gen.render(&p, &mut l, &mut r);
        }
        let (pl, _) = gen.phases();
        let dist = pl.min(TAU - pl);
        assert!(dist < 0.05, "phase_l={} dist={}", pl, dist);
    }
}
