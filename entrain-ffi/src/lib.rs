//! C ABI wrapper for the Entrain beat generator.
//!
//! Exposes a small set of functions to create/destroy an engine, render
//! stereo f32 samples (interleaved or planar), and set the three live
//! parameters.
//!
//! ABI notes
//! - All functions are `extern "C"` and `#[no_mangle]`.
//! - Opaque handle type: `EntrainEngine` (heap-allocated; you own/delete it).
//!
//! Threading
//! - Render and reset functions must be called from one (audio) thread.
//! - The `entrain_set_*` functions are wait-free and may be called from any
//!   thread while audio runs; values land at the next block boundary.

use std::sync::Arc;

use entrain_engine::graph::Engine;
use entrain_engine::node::BeatNode;
use entrain_engine::shared::SharedBeatParams;

/// Opaque engine wrapper we hand to C.
///
/// We keep the sample rate here so the render calls don't take SR every time.
/// The host should call `entrain_reset(engine, sr)` on reconfiguration.
#[repr(C)]
pub struct EntrainEngine {
    sr: f32,
    params: Arc<SharedBeatParams>,
    inner: Engine<BeatNode>,
}

impl EntrainEngine {
    fn new(sr: f32) -> Self {
        let sr = sr.max(1.0);
        let node = BeatNode::new(sr);
        let params = node.params();
        Self {
            sr,
            params,
            inner: Engine::new(node, sr),
        }
    }
}

// --- Creation / destruction -------------------------------------------------------

/// Create a new engine at the host's sample rate, with default parameters
/// (250 Hz left, 260 Hz right, gain 0.5).
/// Returns a non-null pointer on success, or null on allocation failure.
#[no_mangle]
pub extern "C" fn entrain_create(sample_rate: f32) -> *mut EntrainEngine {
    let eng = EntrainEngine::new(sample_rate);
    Box::into_raw(Box::new(eng))
}

/// Destroy an engine previously returned by `entrain_create`.
#[no_mangle]
pub extern "C" fn entrain_destroy(engine: *mut EntrainEngine) {
    if !engine.is_null() {
        unsafe {
            drop(Box::from_raw(engine));
        }
    }
}

/// Reset the engine to a new sample rate (e.g., when the host changes device
/// config). Phases return to 0; parameters keep their latest published values.
#[no_mangle]
pub extern "C" fn entrain_reset(engine: *mut EntrainEngine, sample_rate: f32) {
    if engine.is_null() {
        return;
    }
    let e = unsafe { &mut *engine };
    e.sr = sample_rate.max(1.0);
    e.inner.reset(e.sr);
}

// --- Rendering -------------------------------------------------------------------

/// Render `frames` of audio into an interleaved f32 buffer with `channels`
/// channels. Left fills slot 0, right slot 1, further slots get silence.
///
/// Returns the number of frames rendered. A null engine/buffer, zero sizes,
/// or fewer than 2 channels renders nothing and returns 0 (the buffer is left
/// untouched; this is the sub-stereo destination contract, not an error the
/// host must react to).
#[no_mangle]
pub extern "C" fn entrain_render_interleaved_f32(
    engine: *mut EntrainEngine,
    out_interleaved: *mut f32,
    frames: u32,
    channels: u32,
) -> u32 {
    if engine.is_null() || out_interleaved.is_null() || frames == 0 || channels < 2 {
        return 0;
    }
    let e = unsafe { &mut *engine };
    let out = unsafe {
        std::slice::from_raw_parts_mut(out_interleaved, (frames as usize) * (channels as usize))
    };

    e.inner.process_interleaved(e.sr, out, channels as usize);
    frames
}

/// Render `frames` of audio into two planar (non-interleaved) f32 buffers.
///
/// Returns the number of frames rendered; 0 if the engine or either buffer is
/// null or `frames` is 0.
#[no_mangle]
pub extern "C" fn entrain_render_planar_f32(
    engine: *mut EntrainEngine,
    out_left: *mut f32,
    out_right: *mut f32,
    frames: u32,
) -> u32 {
    if engine.is_null() || out_left.is_null() || out_right.is_null() || frames == 0 {
        return 0;
    }
    let e = unsafe { &mut *engine };
    let left = unsafe { std::slice::from_raw_parts_mut(out_left, frames as usize) };
    let right = unsafe { std::slice::from_raw_parts_mut(out_right, frames as usize) };

    e.inner.process(e.sr, &mut [left, right]);
    frames
}

// --- Parameter setters ------------------------------------------------------------

/// Set the left-ear oscillator frequency in Hz. Values are clamped to
/// [0, 20000] at the next block; non-finite values fall back to the default.
/// Wait-free; callable from any thread.
#[no_mangle]
pub extern "C" fn entrain_set_left_frequency(engine: *mut EntrainEngine, hz: f32) {
    if engine.is_null() {
        return;
    }
    let e = unsafe { &*engine };
    e.params.set_left_hz(hz);
}

/// Set the right-ear oscillator frequency in Hz. Same domain handling as
/// `entrain_set_left_frequency`. Wait-free; callable from any thread.
#[no_mangle]
pub extern "C" fn entrain_set_right_frequency(engine: *mut EntrainEngine, hz: f32) {
    if engine.is_null() {
        return;
    }
    let e = unsafe { &*engine };
    e.params.set_right_hz(hz);
}

/// Set the linear gain. Clamped to [0, 1] at the next block; non-finite
/// values fall back to the default. Wait-free; callable from any thread.
#[no_mangle]
pub extern "C" fn entrain_set_gain(engine: *mut EntrainEngine, gain: f32) {
    if engine.is_null() {
        return;
    }
    let e = unsafe { &*engine };
    e.params.set_gain(gain);
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_render_destroy_round_trip() {
        let eng = entrain_create(48_000.0);
        assert!(!eng.is_null());

        let mut out = vec![0.0f32; 480 * 2];
        let n = entrain_render_interleaved_f32(eng, out.as_mut_ptr(), 480, 2);
        assert_eq!(n, 480);
        // defaults make sound: the block is not all zeros
        assert!(out.iter().any(|&s| s != 0.0));

        entrain_destroy(eng);
    }

    #[test]
    fn mono_destination_returns_zero_and_writes_nothing() {
        let eng = entrain_create(48_000.0);
        let mut out = vec![7.0f32; 480];
        let n = entrain_render_interleaved_f32(eng, out.as_mut_ptr(), 480, 1);
        assert_eq!(n, 0);
        assert!(out.iter().all(|&s| s == 7.0));
        entrain_destroy(eng);
    }

    #[test]
    fn planar_render_matches_defaults() {
        let eng = entrain_create(48_000.0);
        let mut l = vec![0.0f32; 64];
        let mut r = vec![0.0f32; 64];
        let n = entrain_render_planar_f32(eng, l.as_mut_ptr(), r.as_mut_ptr(), 64);
        assert_eq!(n, 64);
        assert_eq!(l[0], 0.0); // sine starts at phase 0
        assert!(l[1] != 0.0);
        entrain_destroy(eng);
    }

    #[test]
    fn setters_apply_at_next_block() {
        let eng = entrain_create(48_000.0);
        entrain_set_gain(eng, 0.0);
        let mut l = vec![1.0f32; 64];
        let mut r = vec![1.0f32; 64];
        entrain_render_planar_f32(eng, l.as_mut_ptr(), r.as_mut_ptr(), 64);
        assert!(l.iter().all(|&s| s == 0.0));
        assert!(r.iter().all(|&s| s == 0.0));
        entrain_destroy(eng);
    }

    #[test]
    fn null_handles_are_ignored() {
        entrain_destroy(std::ptr::null_mut());
        entrain_set_gain(std::ptr::null_mut(), 0.5);
        let n = entrain_render_planar_f32(
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            64,
        );
        assert_eq!(n, 0);
    }
}
