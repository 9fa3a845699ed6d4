//! `Sketch`: planar profiles that are swept into solids.

use crate::errors::ModelError;
use crate::float_types::{PI, Real, TAU};
use geo::orient::{Direction, Orient};
use geo::{Area, BooleanOps, BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Polygon, Rect};
use nalgebra::Vector2;
use tracing::debug;

pub mod shapes;
pub mod workplane;

pub use workplane::Workplane;

/// Distance below which two consecutive outline points are merged.
const MERGE_DISTANCE: Real = 1e-9;

/// A 2D region made of one or more polygons with holes.
///
/// Exterior rings are kept counter-clockwise and holes clockwise, which is
/// what extrusion relies on to orient side walls.
#[derive(Clone, Debug, PartialEq)]
pub struct Sketch {
    pub geometry: MultiPolygon<Real>,
}

impl Default for Sketch {
    fn default() -> Self {
        Sketch {
            geometry: MultiPolygon(Vec::new()),
        }
    }
}

impl Sketch {
    /// An empty sketch
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap geo polygons, normalising ring orientation.
    pub fn from_geo(geometry: MultiPolygon<Real>) -> Self {
        Sketch {
            geometry: geometry.orient(Direction::Default),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    pub fn polygons(&self) -> &[Polygon<Real>] {
        &self.geometry.0
    }

    pub fn union(&self, other: &Sketch) -> Sketch {
        Sketch::from_geo(self.geometry.union(&other.geometry))
    }

    pub fn difference(&self, other: &Sketch) -> Sketch {
        Sketch::from_geo(self.geometry.difference(&other.geometry))
    }

    pub fn intersection(&self, other: &Sketch) -> Sketch {
        Sketch::from_geo(self.geometry.intersection(&other.geometry))
    }

    pub fn area(&self) -> Real {
        self.geometry.unsigned_area()
    }

    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        self.geometry.bounding_rect()
    }

    fn map(&self, f: impl Fn(Coord<Real>) -> Coord<Real> + Copy) -> Sketch {
        Sketch::from_geo(self.geometry.map_coords(f))
    }

    pub fn translate(&self, dx: Real, dy: Real) -> Sketch {
        self.map(move |c| Coord { x: c.x + dx, y: c.y + dy })
    }

    /// Rotate counter-clockwise about the origin.
    pub fn rotate(&self, degrees: Real) -> Sketch {
        self.rotate_around(degrees, 0.0, 0.0)
    }

    /// Rotate counter-clockwise about the pivot `(px, py)`.
    pub fn rotate_around(&self, degrees: Real, px: Real, py: Real) -> Sketch {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.map(move |c| {
            let (x, y) = (c.x - px, c.y - py);
            Coord {
                x: px + x * cos - y * sin,
                y: py + x * sin + y * cos,
            }
        })
    }

    /// Mirror across the Y axis (negates x).
    pub fn mirror_x(&self) -> Sketch {
        self.map(|c| Coord { x: -c.x, y: c.y })
    }

    /// Mirror across the X axis (negates y).
    pub fn mirror_y(&self) -> Sketch {
        self.map(|c| Coord { x: c.x, y: -c.y })
    }

    /// Move the sketch so its bounding rectangle is centered on the origin.
    pub fn centered(&self) -> Sketch {
        match self.bounding_rect() {
            Some(rect) => {
                let center = rect.center();
                self.translate(-center.x, -center.y)
            },
            None => self.clone(),
        }
    }

    /// Round every corner of every ring with an arc of `radius`.
    ///
    /// Convex and concave corners are both rounded. Where the two adjacent
    /// edges are too short for the full radius, the corner gets the largest
    /// arc that still fits in half of the shorter edge.
    pub fn fillet_corners(&self, radius: Real, segments: usize) -> Result<Sketch, ModelError> {
        self.fillet_selected_corners(radius, segments, |_| true)
    }

    /// Like [`Sketch::fillet_corners`], but only rounds corners whose
    /// position satisfies `select`.
    pub fn fillet_selected_corners(
        &self,
        radius: Real,
        segments: usize,
        select: impl Fn(Coord<Real>) -> bool,
    ) -> Result<Sketch, ModelError> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(ModelError::invalid("radius", format!("fillet radius must be non negative, got {radius}")));
        }
        if radius == 0.0 {
            return Ok(self.clone());
        }
        let round = |ring: &LineString<Real>| {
            LineString::from(fillet_ring(&open_ring(ring), radius, segments.max(4), &select))
        };
        let polygons = self
            .geometry
            .iter()
            .map(|polygon| {
                Polygon::new(
                    round(polygon.exterior()),
                    polygon.interiors().iter().map(&round).collect(),
                )
            })
            .collect();
        Ok(Sketch::from_geo(MultiPolygon::new(polygons)))
    }
}

/// Ring points without the closing duplicate and without repeated points.
pub(crate) fn open_ring(ring: &LineString<Real>) -> Vec<Coord<Real>> {
    let mut points: Vec<Coord<Real>> = Vec::with_capacity(ring.0.len());
    for &c in &ring.0 {
        if points
            .last()
            .is_none_or(|last| distance(*last, c) > MERGE_DISTANCE)
        {
            points.push(c);
        }
    }
    while points.len() > 1
        && points
            .first()
            .zip(points.last())
            .is_some_and(|(first, last)| distance(*first, *last) <= MERGE_DISTANCE)
    {
        points.pop();
    }
    points
}

fn distance(a: Coord<Real>, b: Coord<Real>) -> Real {
    (a.x - b.x).hypot(a.y - b.y)
}

fn fillet_ring(
    points: &[Coord<Real>],
    radius: Real,
    segments: usize,
    select: &impl Fn(Coord<Real>) -> bool,
) -> Vec<Coord<Real>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut out: Vec<Coord<Real>> = Vec::with_capacity(n * 4);
    let mut push = |c: Coord<Real>| {
        if out.last().is_none_or(|last| distance(*last, c) > MERGE_DISTANCE) {
            out.push(c);
        }
    };

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let corner = points[i];
        let next = points[(i + 1) % n];
        if !select(corner) {
            push(corner);
            continue;
        }

        let p1 = Vector2::new(corner.x, corner.y);
        let to_prev = Vector2::new(prev.x, prev.y) - p1;
        let to_next = Vector2::new(next.x, next.y) - p1;
        let (len_prev, len_next) = (to_prev.norm(), to_next.norm());
        let (d1, d2) = (to_prev / len_prev, to_next / len_next);

        // Interior angle between the two edges at the corner.
        let theta = d1.dot(&d2).clamp(-1.0, 1.0).acos();
        if theta > PI - 1e-6 || theta < 1e-6 {
            push(corner);
            continue;
        }
        let half = theta * 0.5;

        let mut r = radius;
        let mut tangent = r / half.tan();
        let limit = 0.5 * len_prev.min(len_next);
        if tangent > limit {
            tangent = limit;
            r = tangent * half.tan();
            debug!(requested = radius, used = r, "clamped corner fillet to adjacent edges");
        }

        let start = p1 + d1 * tangent;
        let end = p1 + d2 * tangent;
        let center = p1 + (d1 + d2).normalize() * (r / half.sin());

        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let end_angle = (end.y - center.y).atan2(end.x - center.x);
        // Short way round; the arc sweep is pi - theta which is below pi.
        let mut sweep = end_angle - start_angle;
        while sweep > PI {
            sweep -= TAU;
        }
        while sweep < -PI {
            sweep += TAU;
        }

        let steps = ((segments as Real) * sweep.abs() / TAU).ceil().max(1.0) as usize;
        for k in 0..=steps {
            let angle = start_angle + sweep * k as Real / steps as Real;
            push(Coord {
                x: center.x + r * angle.cos(),
                y: center.y + r * angle.sin(),
            });
        }
    }

    while out.len() > 1
        && out
            .first()
            .zip(out.last())
            .is_some_and(|(first, last)| distance(*first, *last) <= MERGE_DISTANCE)
    {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ring_drops_closing_point() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(open_ring(&ring).len(), 3);
    }

    #[test]
    fn fillet_keeps_collinear_points() {
        let points = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 2.0, y: 0.0 },
            Coord { x: 2.0, y: 2.0 },
        ];
        let rounded = fillet_ring(&points, 0.1, 16, &|c: Coord<Real>| c.x == 1.0);
        assert_eq!(rounded, points.to_vec());
    }
}
