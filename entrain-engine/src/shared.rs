//! Wait-free parameter sharing between the control thread and the audio thread.
//!
//! Single producer (UI / control surface), single consumer (audio callback).
//! The handoff is one atomic word per parameter: the producer stores, the
//! consumer loads. No locks, no allocation, no waiting on either side.
//!
//! Semantics
//! - Each parameter is torn-read-free by construction (one 32-bit word).
//! - "Latest wins": the consumer snapshots once per block and may skip
//!   intermediate values, which is the correct behavior for a control signal.
//! - A parameter that was never published reads as its documented default.

use std::sync::atomic::{AtomicU32, Ordering};

use entrain_core::params::{BeatParams, DEFAULT_GAIN, DEFAULT_LEFT_HZ, DEFAULT_RIGHT_HZ};

/// An `f32` stored as `AtomicU32` bits so both threads touch one word.
#[derive(Debug)]
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    #[inline]
    pub fn new(value: f32) -> Self {
        Self { bits: AtomicU32::new(value.to_bits()) }
    }

    /// Publish a new value (control thread).
    #[inline]
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Read the latest published value (audio thread).
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// The three live generator parameters, one atomic word each.
///
/// Share via `Arc`: the control side keeps one clone and calls the setters at
/// slider rate; the audio side calls [`snapshot`](Self::snapshot) once per
/// block. Values are published raw and clamped at the read site, so a burst of
/// out-of-domain slider values can never wedge the stored state.
#[derive(Debug)]
pub struct SharedBeatParams {
    left_hz: AtomicF32,
    right_hz: AtomicF32,
    gain: AtomicF32,
}

impl Default for SharedBeatParams {
    #[inline]
    fn default() -> Self {
        Self {
            left_hz: AtomicF32::new(DEFAULT_LEFT_HZ),
            right_hz: AtomicF32::new(DEFAULT_RIGHT_HZ),
            gain: AtomicF32::new(DEFAULT_GAIN),
        }
    }
}

impl SharedBeatParams {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed all three parameters at once (e.g. from CLI flags before playback).
    #[inline]
    pub fn publish(&self, p: BeatParams) {
        self.left_hz.set(p.left_hz);
        self.right_hz.set(p.right_hz);
        self.gain.set(p.gain);
    }

    #[inline]
    pub fn set_left_hz(&self, hz: f32) {
        self.left_hz.set(hz);
    }

    #[inline]
    pub fn set_right_hz(&self, hz: f32) {
        self.right_hz.set(hz);
    }

    #[inline]
    pub fn set_gain(&self, gain: f32) {
        self.gain.set(gain);
    }

    /// Read the latest published values. Call once per processing block, then
    /// [`BeatParams::clamped`] before use.
    #[inline]
    pub fn snapshot(&self) -> BeatParams {
        BeatParams {
            left_hz: self.left_hz.get(),
            right_hz: self.right_hz.get(),
            gain: self.gain.get(),
        }
    }
}

// ------------------------------------ Tests --------------------------------------
