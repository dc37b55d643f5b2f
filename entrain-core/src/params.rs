//! Parameter domain model for the stereo beat generator.
//!
//! `BeatParams` is a plain `Copy` snapshot: the audio thread receives one per
//! processing block and applies it to the whole block. Cross-thread publication
//! lives in the engine crate; this type only knows domains, defaults, and how
//! to sanitize itself.
//!
//! Domains:
//! - `left_hz`, `right_hz` : [0, 20000] Hz
//! - `gain`                : [0, 1] linear
//!
//! Defaults encode a 10 Hz beat (250 / 260 Hz) at half volume: audible and
//! safe on first start.

use crate::dsp::clamp;

/// Lowest settable oscillator frequency, Hz.
pub const FREQ_MIN_HZ: f32 = 0.0;
/// Highest settable oscillator frequency, Hz (upper edge of hearing).
pub const FREQ_MAX_HZ: f32 = 20_000.0;
/// Linear gain bounds.
pub const GAIN_MIN: f32 = 0.0;
pub const GAIN_MAX: f32 = 1.0;

/// Default left-ear frequency, Hz.
pub const DEFAULT_LEFT_HZ: f32 = 250.0;
/// Default right-ear frequency, Hz.
pub const DEFAULT_RIGHT_HZ: f32 = 260.0;
/// Default linear gain.
pub const DEFAULT_GAIN: f32 = 0.5;

/// One snapshot of the three live-updatable generator parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeatParams {
    /// Left-channel oscillator frequency, Hz.
    pub left_hz: f32,
    /// Right-channel oscillator frequency, Hz.
    pub right_hz: f32,
    /// Linear amplitude applied to both channels.
    pub gain: f32,
}

impl Default for BeatParams {
    #[inline]
    fn default() -> Self {
        Self {
            left_hz: DEFAULT_LEFT_HZ,
            right_hz: DEFAULT_RIGHT_HZ,
            gain: DEFAULT_GAIN,
        }
    }
}

impl BeatParams {
    #[inline]
    pub fn new(left_hz: f32, right_hz: f32, gain: f32) -> Self {
        Self { left_hz, right_hz, gain }.clamped()
    }

    /// Clamp every field into its documented domain.
    ///
    /// A non-finite field (a NaN or ±inf published by a misbehaving control
    /// surface) falls back to that field's default; the render path must never
    /// feed NaN into `sin`.
    #[inline]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            left_hz: clamp_or(self.left_hz, FREQ_MIN_HZ, FREQ_MAX_HZ, DEFAULT_LEFT_HZ),
            right_hz: clamp_or(self.right_hz, FREQ_MIN_HZ, FREQ_MAX_HZ, DEFAULT_RIGHT_HZ),
            gain: clamp_or(self.gain, GAIN_MIN, GAIN_MAX, DEFAULT_GAIN),
        }
    }

    /// Perceived beat rate: |right − left| Hz.
    #[inline]
    pub fn beat_hz(&self) -> f32 {
        (self.right_hz - self.left_hz).abs()
    }
}

#[inline]
fn clamp_or(x: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if x.is_finite() { clamp(x, lo, hi) } else { fallback }
}

// ------------------------------------ Tests --------------------------------------
