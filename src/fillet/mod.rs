//! Rounded edges for prismatic solids.
//!
//! Solids are polygon soups without explicit edges, so fillets are built
//! while the solid is created: vertical edges by rounding the profile
//! corners, cap edges by stacking inset copies of the outline along a
//! quarter circle.

use crate::errors::{ModelError, require_positive};
use crate::extrude::{Layer, extrude, stitch_layers};
use crate::float_types::{FRAC_PI_2, Real};
use crate::mesh::Mesh;
use crate::sketch::{Sketch, open_ring};
use geo::{Coord, Polygon};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod assist;

/// Which edges of an extruded profile are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSelection {
    /// Edges parallel to the extrusion direction (the profile corners).
    Vertical,
    /// Outline of the top cap.
    Top,
    /// Outline of the bottom cap.
    Bottom,
    TopAndBottom,
    /// Every edge of the solid.
    All,
}

impl EdgeSelection {
    fn rounds_vertical(self) -> bool {
        matches!(self, EdgeSelection::Vertical | EdgeSelection::All)
    }

    fn rounds_top(self) -> bool {
        matches!(self, EdgeSelection::Top | EdgeSelection::TopAndBottom | EdgeSelection::All)
    }

    fn rounds_bottom(self) -> bool {
        matches!(self, EdgeSelection::Bottom | EdgeSelection::TopAndBottom | EdgeSelection::All)
    }
}

/// Extrude `sketch` by `height` along +Z and round the selected edges with `radius`.
///
/// Errors with [`ModelError::FilletTooLarge`] when the radius does not fit
/// the height (half of it when both caps are rounded) or when insetting
/// the outline by the radius would turn it inside out.
pub fn extrude_filleted(
    sketch: &Sketch,
    height: Real,
    radius: Real,
    edges: EdgeSelection,
    segments: usize,
) -> Result<Mesh, ModelError> {
    require_positive("height", height)?;
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(ModelError::invalid("radius", format!("fillet radius must be non negative, got {radius}")));
    }
    if radius == 0.0 {
        return extrude(sketch, height);
    }

    let profile = if edges.rounds_vertical() {
        sketch.fillet_corners(radius, segments)?
    } else {
        sketch.clone()
    };
    let (top, bottom) = (edges.rounds_top(), edges.rounds_bottom());
    if !top && !bottom {
        return extrude(&profile, height);
    }

    let height_limit = if top && bottom { height * 0.5 } else { height };
    // Sharp profiles are checked before their corners get rounded: a
    // corner rounded by the same radius shrinks to a point at full inset.
    let inset_limit = max_inset(sketch)?;
    let limit = height_limit.min(inset_limit);
    if radius > limit + 1e-9 {
        return Err(ModelError::FilletTooLarge { radius, limit });
    }

    let steps = (segments / 4).max(2);
    let mut parts = Vec::with_capacity(profile.polygons().len());
    for polygon in profile.polygons() {
        let rings = InsetPolygon::new(polygon)?;
        let mut layers: Vec<Layer> = Vec::with_capacity(2 * steps + 2);
        let mut push = |layer: Layer| {
            if layers.last().is_none_or(|last| layer.z > last.z + 1e-12) {
                layers.push(layer);
            }
        };

        if bottom {
            for k in 0..=steps {
                let phi = FRAC_PI_2 * k as Real / steps as Real;
                push(rings.layer(radius - radius * phi.sin(), radius - radius * phi.cos()));
            }
        } else {
            push(rings.layer(0.0, 0.0));
        }
        if top {
            for k in 0..=steps {
                let phi = FRAC_PI_2 * k as Real / steps as Real;
                push(rings.layer(radius - radius * phi.cos(), height - radius + radius * phi.sin()));
            }
        } else {
            push(rings.layer(0.0, height));
        }

        parts.push(stitch_layers(&layers)?);
    }
    Ok(Mesh::compound(parts))
}

/// Largest distance every outline of `sketch` can be inset before an edge
/// shrinks past zero length.
fn max_inset(sketch: &Sketch) -> Result<Real, ModelError> {
    let mut limit = Real::INFINITY;
    for polygon in sketch.polygons() {
        limit = limit.min(InsetPolygon::new(polygon)?.limit);
    }
    Ok(limit)
}

/// Outline rings prepared for repeated insetting towards the material side.
struct InsetPolygon {
    rings: Vec<(Vec<Coord<Real>>, Vec<Vector2<Real>>)>,
    limit: Real,
}

impl InsetPolygon {
    fn new(polygon: &Polygon<Real>) -> Result<Self, ModelError> {
        let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
        let mut limit = Real::INFINITY;
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            let points = open_ring(ring);
            let (miters, ring_limit) = miter_offsets(&points)?;
            limit = limit.min(ring_limit);
            rings.push((points, miters));
        }
        Ok(InsetPolygon { rings, limit })
    }

    /// All rings inset by `distance`, placed at height `z`. The inset is
    /// capped at the collapse limit so no edge flips over.
    fn layer(&self, distance: Real, z: Real) -> Layer {
        let distance = if distance > self.limit {
            debug!(requested = distance, used = self.limit, "capped fillet inset at outline collapse");
            self.limit
        } else {
            distance
        };
        let rings = self
            .rings
            .iter()
            .map(|(points, miters)| {
                points
                    .iter()
                    .zip(miters)
                    .map(|(p, m)| Coord {
                        x: p.x + m.x * distance,
                        y: p.y + m.y * distance,
                    })
                    .collect()
            })
            .collect();
        Layer { z, rings }
    }
}

/// Per-vertex offset vectors for a unit inset to the left of the ring
/// direction, and the inset at which the first edge collapses.
fn miter_offsets(points: &[Coord<Real>]) -> Result<(Vec<Vector2<Real>>, Real), ModelError> {
    let n = points.len();
    if n < 3 {
        return Err(ModelError::DegenerateProfile("ring with fewer than 3 points".into()));
    }
    let direction = |i: usize| {
        let (a, b) = (points[i % n], points[(i + 1) % n]);
        Vector2::new(b.x - a.x, b.y - a.y)
    };

    let mut miters = Vec::with_capacity(n);
    // tan of half the turning angle at each vertex, positive for left turns
    let mut shrink = Vec::with_capacity(n);
    for i in 0..n {
        let e1 = direction(i + n - 1).normalize();
        let e2 = direction(i).normalize();
        let n1 = Vector2::new(-e1.y, e1.x);
        let n2 = Vector2::new(-e2.y, e2.x);
        let denom = 1.0 + n1.dot(&n2);
        if denom < 1e-6 {
            return Err(ModelError::DegenerateProfile("outline folds back onto itself".into()));
        }
        miters.push((n1 + n2) / denom);
        let turn = e1.perp(&e2).atan2(e1.dot(&e2));
        shrink.push((turn * 0.5).tan());
    }

    let limit = (0..n)
        .filter_map(|i| {
            let rate = shrink[i] + shrink[(i + 1) % n];
            (rate > 1e-12).then(|| direction(i).norm() / rate)
        })
        .fold(Real::INFINITY, Real::min);
    Ok((miters, limit))
}
