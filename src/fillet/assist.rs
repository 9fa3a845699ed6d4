//! Helper solids for rounding edges after a boolean.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude_on;
use crate::float_types::{PI, Real};
use crate::mesh::Mesh;
use crate::sketch::{Sketch, Workplane};

/// The cove between two perpendicular faces and a fillet of `radius`:
/// an `r x r` square minus the quarter disc centered on its far corner,
/// extruded `length` along X and centered on the origin in X.
///
/// In the YZ plane the cove occupies `y, z ∈ [0, r]` with the rounded side
/// facing `(+y, +z)`. Union it into an inner corner to fill it, or mirror
/// and place it along an outer lip and subtract it to round that lip.
pub fn outer_fillet(length: Real, radius: Real, segments: usize) -> Result<Mesh, ModelError> {
    require_positive("length", length)?;
    require_positive("radius", radius)?;

    let steps = (segments / 4).max(2);
    let mut points = vec![[0.0, 0.0], [radius, 0.0]];
    // Quarter arc around (r, r) from 270 to 180 degrees, end points excluded.
    for k in 1..steps {
        let angle = 1.5 * PI - 0.5 * PI * k as Real / steps as Real;
        points.push([radius + radius * angle.cos(), radius + radius * angle.sin()]);
    }
    points.push([0.0, radius]);

    let profile = Sketch::polygon(&points)?;
    extrude_on(&profile, &Workplane::YZ.offset(-length * 0.5), length)
}
