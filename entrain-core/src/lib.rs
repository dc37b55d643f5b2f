#![cfg_attr(not(feature = "std"), no_std)]
//! Entrain Core — no_std-ready primitives for the stereo binaural-beat generator.
//!
//! Features
//! - `std`      : (default) use the Rust standard library
//! - `no-std`   : build with `#![no_std]` and use `libm`/`micromath` math backends
//! - `fast-math`: enable a polynomial sine approximation for the hot path
//!
//! Modules
//! - [`dsp`]    : math backend selection, TAU, clamp
//! - [`params`] : parameter domains, defaults, sanitizing snapshot type
//! - [`beat`]   : the `StereoBeat` generator (phase accumulators + render)
//!
//! Design
//! - No heap allocations; the render path never locks, blocks, or panics
//! - Phase continuity across blocks is the central invariant; parameter
//!   snapshots apply per block, never mid-block
//! - Friendly to embedded / real-time targets

pub mod beat;
pub mod dsp;
pub mod params;

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::beat::StereoBeat;
    pub use crate::dsp::{clamp, TAU};
    pub use crate::params::{
        BeatParams, DEFAULT_GAIN, DEFAULT_LEFT_HZ, DEFAULT_RIGHT_HZ, FREQ_MAX_HZ, FREQ_MIN_HZ,
        GAIN_MAX, GAIN_MIN,
    };
}

#[cfg(test)]
mod smoke {

    #[test]
    fn prelude_exists() {
        use crate::prelude::*;
        let p = BeatParams::default();
        let mut gen = StereoBeat::new(48_000.0);
        let _ = gen.next_frame(&p);
        let _ = clamp(0.5, GAIN_MIN, GAIN_MAX);
    }
}
