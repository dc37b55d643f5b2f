//! Entrain Engine — realtime glue around the core beat generator.
//!
//! Crate layout:
//! - [`graph`]    : `StereoGenerator` trait and `Engine<G>` wrapper
//! - [`shared`]   : wait-free parameter handoff (control thread → audio thread)
//! - [`node`]     : `BeatNode`, the generator wired to shared parameters
//! - [`realtime`] : CPAL device/config/stream helpers (feature `realtime`)
//!
//! The engine deliberately avoids heap allocations in the audio thread.
//! Parameters cross threads through one atomic word each; the audio side
//! latches a snapshot once per block and never waits on the control side.

pub mod graph;
pub mod node;
pub mod shared;

#[cfg(feature = "realtime")]
pub mod realtime;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use graph::{Engine, StereoGenerator};
pub use node::BeatNode;
pub use shared::{AtomicF32, SharedBeatParams};

#[cfg(feature = "realtime")]
pub use cpal;
