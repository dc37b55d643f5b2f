//! Math backend selection and shared numeric helpers.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - Math backend selection that works in both `std` and `no_std` contexts
//! - Optional `fast-math` approximation for the oscillator hot path
//! - Clean, side-effect free helpers that are easy to test
//!
//! Features used by this file:
//! - `fast-math`  : enables a polynomial sine (faster, approx.)
//! - `micromath`  : swap the math backend for embedded-friendly approximations
//!
//! Conventions:
//! - All functions are `#[inline]` where useful to help the optimizer.
//! - Argument and return domains are documented per function.

#![allow(clippy::excessive_precision)]

use core::f32::consts::PI;

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // micromath preferred if explicitly requested (works in no_std)
    if #[cfg(feature = "micromath")] {
        use micromath::F32Ext as _;
        #[inline] fn m_sin(x: f32) -> f32 { x.sin() }
    // libm (C math) in no_std
    } else if #[cfg(feature = "no-std")] {
        #[inline] fn m_sin(x: f32) -> f32 { libm::sinf(x) }
    // std backend
    } else {
        #[inline] fn m_sin(x: f32) -> f32 { x.sin() }
    }
}

// --------------------------------- Constants -------------------------------------

/// 2π, one full oscillator cycle in radians.
pub const TAU: f32 = 2.0 * PI;

// --------------------------------- Utilities -------------------------------------

/// Clamp `x` into `[lo, hi]`.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo { lo } else if x > hi { hi } else { x }
}

// --------------------------------- Sine ------------------------------------------

/// Sine of a phase in radians through the selected math backend.
#[cfg(not(feature = "fast-math"))]
#[inline]
pub fn sin(x: f32) -> f32 {
    m_sin(x)
}

/// Sine of a phase in radians, `fast-math` rendition: a 5th-order odd
/// polynomial with range reduction into [-π, π]. Max abs error ~1e-3, fine
/// for tone generation but not bit-identical to the exact backend.
#[cfg(feature = "fast-math")]
#[inline]
pub fn sin(x: f32) -> f32 {
    // Range reduce to [-π, π].
    let k = (x / TAU).round();
    let xr = x - k * TAU;

    // 5th-order odd polynomial: sin(x) ≈ x * (a + b x^2 + c x^4)
    let x2 = xr * xr;
    xr * (0.999_979_313_3 + x2 * (-0.166_624_432_0 + x2 * 0.008_308_978_98))
}

// --------------------------------- Tests (std only) ------------------------------
