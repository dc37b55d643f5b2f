//! The audio-thread half of the system: a [`StereoBeat`] wired to shared
//! parameters through the block-latch discipline.
//!
//! `BeatNode` implements [`StereoGenerator`]: `begin_block` takes exactly one
//! snapshot of the shared parameters and clamps it; every `next_frame` in that
//! block renders with the latched values. Parameter changes therefore take
//! effect at the next block boundary and never mid-buffer.

use std::sync::Arc;

use entrain_core::beat::StereoBeat;
use entrain_core::params::BeatParams;

use crate::graph::StereoGenerator;
use crate::shared::SharedBeatParams;

/// Stereo beat source with wait-free live parameters.
pub struct BeatNode {
    beat: StereoBeat,
    shared: Arc<SharedBeatParams>,
    active: BeatParams,
}

impl BeatNode {
    /// Create a node with fresh shared parameters at their defaults.
    #[inline]
    pub fn new(sample_rate: f32) -> Self {
        Self::with_params(sample_rate, Arc::new(SharedBeatParams::new()))
    }

    /// Create a node publishing/consuming through an existing handle.
    #[inline]
    pub fn with_params(sample_rate: f32, shared: Arc<SharedBeatParams>) -> Self {
        let active = shared.snapshot().clamped();
        Self {
            beat: StereoBeat::new(sample_rate),
            shared,
            active,
        }
    }

    /// Clone of the shared-parameter handle for the control thread.
    #[inline]
    pub fn params(&self) -> Arc<SharedBeatParams> {
        Arc::clone(&self.shared)
    }

    /// The snapshot currently applied to the block being rendered.
    #[inline]
    pub fn active_params(&self) -> BeatParams {
        self.active
    }

    /// Phase pair of the underlying generator, for hosts that inspect it.
    #[inline]
    pub fn phases(&self) -> (f32, f32) {
        self.beat.phases()
    }
}

impl StereoGenerator for BeatNode {
    #[inline]
    fn reset(&mut self, sr: f32) {
        self.beat.reset(sr);
    }

    #[inline]
    fn begin_block(&mut self) {
        self.active = self.shared.snapshot().clamped();
    }

    #[inline]
    fn next_frame(&mut self) -> (f32, f32) {
        self.beat.next_frame(&self.active)
    }
}

// ------------------------------------ Tests --------------------------------------
