//! Metric trapezoidal threads and flat head screws.
//!
//! Threads are radial height fields: for every height `z` and angle `θ`
//! the surface radius follows the trapezoid profile at phase
//! `z / pitch - θ / 2π`. Stitching rows of constant `z` gives a closed
//! solid without any boolean operation.

use crate::errors::{ModelError, require_positive};
use crate::extrude::{Layer, stitch_layers};
use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use geo::Coord;
use serde::{Deserialize, Serialize};

/// Share of the pitch taken by each flank of the trapezoid.
const FLANK: Real = 0.134;
/// Share of the pitch taken by the flat crest (and, equally, the root).
const CREST: Real = 0.366;
/// Height rows sampled per pitch.
const ROWS_PER_PITCH: usize = 16;
/// Radial play added to internal threads.
const INTERNAL_CLEARANCE: Real = 0.1;

/// A single start right hand trapezoidal thread with a 30 degree included angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidalThread {
    pub diameter: Real,
    pub pitch: Real,
    pub length: Real,
    /// `false` builds the mating nut thread, widened for clearance, to be
    /// subtracted from a body.
    pub external: bool,
}

impl TrapezoidalThread {
    pub fn new(diameter: Real, pitch: Real, length: Real, external: bool) -> Self {
        TrapezoidalThread {
            diameter,
            pitch,
            length,
            external,
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_positive("diameter", self.diameter)?;
        require_positive("pitch", self.pitch)?;
        require_positive("length", self.length)?;
        if self.pitch >= self.diameter {
            return Err(ModelError::invalid(
                "pitch",
                format!("pitch {} must be smaller than the diameter {}", self.pitch, self.diameter),
            ));
        }
        Ok(())
    }

    /// Thread depth, half the pitch.
    pub fn depth(&self) -> Real {
        self.pitch * 0.5
    }

    pub fn major_radius(&self) -> Real {
        let clearance = if self.external { 0.0 } else { INTERNAL_CLEARANCE * self.pitch };
        self.diameter * 0.5 + clearance
    }

    pub fn minor_radius(&self) -> Real {
        self.major_radius() - self.depth()
    }

    /// Surface radius at height `z` (from the thread start) and angle `theta`.
    pub fn radius_at(&self, z: Real, theta: Real) -> Real {
        let phase = (z / self.pitch - theta / TAU).rem_euclid(1.0);
        let lift = if phase < FLANK {
            phase / FLANK
        } else if phase < FLANK + CREST {
            1.0
        } else if phase < 2.0 * FLANK + CREST {
            1.0 - (phase - FLANK - CREST) / FLANK
        } else {
            0.0
        };
        self.minor_radius() + self.depth() * lift
    }

    /// Heights of the thread rows, from 0 to `length`.
    fn row_heights(&self) -> Vec<Real> {
        let rows = ((self.length / self.pitch) * ROWS_PER_PITCH as Real).ceil().max(1.0) as usize;
        (0..=rows).map(|k| self.length * k as Real / rows as Real).collect()
    }

    fn layer(&self, z: Real, segments: usize) -> Layer {
        Layer {
            z,
            rings: vec![ring(segments, |theta| self.radius_at(z, theta))],
        }
    }

    /// The threaded rod from z = 0 to z = `length`.
    pub fn build(&self, segments: usize) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = segments.max(8);
        let layers: Vec<Layer> = self.row_heights().into_iter().map(|z| self.layer(z, segments)).collect();
        stitch_layers(&layers)
    }
}

fn ring(segments: usize, radius: impl Fn(Real) -> Real) -> Vec<Coord<Real>> {
    (0..segments)
        .map(|j| {
            let theta = TAU * j as Real / segments as Real;
            let r = radius(theta);
            Coord {
                x: r * theta.cos(),
                y: r * theta.sin(),
            }
        })
        .collect()
}

/// Dimensions of a flat head screw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrewSpec {
    pub diameter: Real,
    pub pitch: Real,
    /// Overall length, head included, as the thread runs the full length.
    pub length: Real,
    /// Defaults to 1.8 times the diameter.
    pub head_diameter: Option<Real>,
    /// Defaults to 0.6 times the diameter.
    pub head_height: Option<Real>,
}

impl Default for ScrewSpec {
    fn default() -> Self {
        ScrewSpec {
            diameter: 8.0,
            pitch: 1.5,
            length: 20.0,
            head_diameter: None,
            head_height: None,
        }
    }
}

impl ScrewSpec {
    /// Conventional size label, e.g. `8x1.5`.
    pub fn size(&self) -> String {
        format!("{}x{}", self.diameter, self.pitch)
    }

    pub fn build(&self, segments: usize) -> Result<Mesh, ModelError> {
        screw_base(
            self.diameter,
            self.pitch,
            self.length,
            self.head_diameter,
            self.head_height,
            segments,
        )
    }
}

/// Flat head screw standing on the XY plane, `length` long overall: the
/// head fills z = 0 to the head height and the thread runs the full length.
///
/// Head, core and thread are one radial solid whose radius is the largest of
/// the three at every point, so the result is closed without booleans and
/// equals their union.
pub fn screw_base(
    diameter: Real,
    pitch: Real,
    length: Real,
    head_diameter: Option<Real>,
    head_height: Option<Real>,
    segments: usize,
) -> Result<Mesh, ModelError> {
    let thread = TrapezoidalThread::new(diameter, pitch, length, true);
    thread.validate()?;
    let head_radius = head_diameter.unwrap_or(1.8 * diameter) * 0.5;
    let head_height = head_height.unwrap_or(0.6 * diameter);
    require_positive("head_diameter", head_radius)?;
    require_positive("head_height", head_height)?;

    let segments = segments.max(8);
    let headed = |z: Real| Layer {
        z,
        rings: vec![ring(segments, |theta| thread.radius_at(z, theta).max(head_radius))],
    };

    let mut layers = Vec::new();
    let mut past_head = false;
    for z in thread.row_heights() {
        if z < head_height {
            layers.push(headed(z));
            continue;
        }
        if !past_head {
            // Step from the head down to the thread.
            layers.push(headed(head_height.min(length)));
            layers.push(thread.layer(head_height.min(length), segments));
            past_head = true;
        }
        if z > head_height + 1e-9 {
            layers.push(thread.layer(z, segments));
        }
    }
    stitch_layers(&layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_spans_minor_to_major() {
        let thread = TrapezoidalThread::new(8.0, 2.0, 10.0, true);
        assert_eq!(thread.radius_at(0.0, 0.0), 3.0);
        // middle of the crest
        assert!((thread.radius_at(0.6, 0.0) - 4.0).abs() < 1e-12);
        // middle of the root
        assert!((thread.radius_at(1.6, 0.0) - 3.0).abs() < 1e-12);
        // half a turn around, the crest reaches the height of the root
        assert!((thread.radius_at(1.6, TAU / 2.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn internal_thread_has_clearance() {
        let nut = TrapezoidalThread::new(8.0, 2.0, 10.0, false);
        assert!((nut.major_radius() - 4.2).abs() < 1e-12);
    }

    #[test]
    fn size_label() {
        assert_eq!(ScrewSpec::default().size(), "8x1.5");
    }
}
