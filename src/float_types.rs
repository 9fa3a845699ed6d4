//! Scalar type, tolerances and unit constants used across the crate.

use core::str::FromStr;
use std::sync::OnceLock;

/// Our Real scalar type.
pub type Real = f64;

/// Lazily-initialized tolerance used for plane classification.
/// Can be overridden:
///  1) **Build-time**: set env var `PRINTPARTS_TOLERANCE` (e.g. `PRINTPARTS_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before building any geometry
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-5
}

/// Returns the current plane-classification tolerance.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("PRINTPARTS_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;
/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;
/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

