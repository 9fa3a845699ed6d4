//! Sweeping sketches into solids: linear extrusion and ruled lofts.

use crate::errors::{ModelError, require_positive};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::sketch::{Sketch, Workplane, open_ring};
use crate::traits::CSG;
use geo::{Coord, LineString, Polygon, TriangulateEarcut};
use nalgebra::Point3;

/// Parameter distance below which two loft sample positions are merged.
const PARAM_EPSILON: Real = 1e-9;

/// A planar cross-section at height `z`. Ring 0 is the outline
/// (counter-clockwise), further rings are holes (clockwise).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layer {
    pub z: Real,
    pub rings: Vec<Vec<Coord<Real>>>,
}

impl Layer {
    fn from_polygon(polygon: &Polygon<Real>, z: Real) -> Self {
        let mut rings = vec![open_ring(polygon.exterior())];
        rings.extend(polygon.interiors().iter().map(open_ring));
        Layer { z, rings }
    }
}

/// Extrude a sketch along +Z by `height`. A negative height extrudes
/// downwards from the sketch plane.
///
/// ```
/// use printparts::extrude::extrude;
/// use printparts::sketch::Sketch;
/// let bar = extrude(&Sketch::rectangle(2.0, 3.0).unwrap(), 4.0).unwrap();
/// assert!((bar.volume() - 24.0).abs() < 1e-9);
/// ```
pub fn extrude(sketch: &Sketch, height: Real) -> Result<Mesh, ModelError> {
    if !height.is_finite() || height == 0.0 {
        return Err(ModelError::invalid("height", format!("extrusion height must be non zero, got {height}")));
    }
    if sketch.is_empty() {
        return Err(ModelError::DegenerateProfile("cannot extrude an empty sketch".into()));
    }
    let (bottom, top) = if height > 0.0 { (0.0, height) } else { (height, 0.0) };
    let solids = sketch.polygons().iter().map(|polygon| {
        stitch_layers(&[
            Layer::from_polygon(polygon, bottom),
            Layer::from_polygon(polygon, top),
        ])
    });
    let mut parts = Vec::with_capacity(sketch.polygons().len());
    for solid in solids {
        parts.push(solid?);
    }
    Ok(Mesh::compound(parts))
}

/// Extrude a sketch drawn on `plane` along the plane normal.
pub fn extrude_on(sketch: &Sketch, plane: &Workplane, height: Real) -> Result<Mesh, ModelError> {
    Ok(extrude(sketch, height)?.transform(&plane.to_matrix()))
}

/// Ruled solid between `bottom` at z = 0 and `top` at z = `height`.
///
/// Both profiles must be a single ring without holes. The rings are
/// resampled so every corner of either profile is kept, and the top ring
/// is rotated to start at the vertex closest to the start of the bottom ring.
pub fn loft(bottom: &Sketch, top: &Sketch, height: Real) -> Result<Mesh, ModelError> {
    require_positive("height", height)?;
    let lower = single_ring(bottom, "bottom")?;
    let upper = align_start(&lower, &single_ring(top, "top")?);

    let params = merged_params(&arc_params(&lower), &arc_params(&upper));
    let layers = [
        Layer {
            z: 0.0,
            rings: vec![resample(&lower, &params)],
        },
        Layer {
            z: height,
            rings: vec![resample(&upper, &params)],
        },
    ];
    stitch_layers(&layers)
}

/// Loft through several stacked rings `(z, points)`.
///
/// All rings need the same number of points; point `i` of one ring is
/// connected to point `i` of the next. Clockwise rings are reversed.
pub fn loft_sections(sections: &[(Real, Vec<[Real; 2]>)]) -> Result<Mesh, ModelError> {
    if sections.len() < 2 {
        return Err(ModelError::LoftMismatch("need at least two sections".into()));
    }
    let count = sections[0].1.len();
    let mut layers = Vec::with_capacity(sections.len());
    let mut last_z = Real::NEG_INFINITY;
    for (z, points) in sections {
        if points.len() != count || count < 3 {
            return Err(ModelError::LoftMismatch(format!(
                "sections need the same number (at least 3) of points, got {} and {count}",
                points.len()
            )));
        }
        if *z <= last_z {
            return Err(ModelError::LoftMismatch("section heights must increase".into()));
        }
        last_z = *z;
        let mut ring: Vec<Coord<Real>> = points.iter().map(|p| Coord { x: p[0], y: p[1] }).collect();
        if signed_area(&ring) < 0.0 {
            ring.reverse();
        }
        layers.push(Layer { z: *z, rings: vec![ring] });
    }
    stitch_layers(&layers)
}

fn single_ring(sketch: &Sketch, which: &str) -> Result<Vec<Coord<Real>>, ModelError> {
    match sketch.polygons() {
        [polygon] if polygon.interiors().is_empty() => Ok(open_ring(polygon.exterior())),
        [] => Err(ModelError::LoftMismatch(format!("{which} profile is empty"))),
        _ => Err(ModelError::LoftMismatch(format!(
            "{which} profile must be a single ring without holes"
        ))),
    }
}

pub(crate) fn signed_area(ring: &[Coord<Real>]) -> Real {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<Real>()
        * 0.5
}

fn centroid(ring: &[Coord<Real>]) -> Coord<Real> {
    let sum = ring
        .iter()
        .fold(Coord { x: 0.0, y: 0.0 }, |acc, c| Coord { x: acc.x + c.x, y: acc.y + c.y });
    Coord {
        x: sum.x / ring.len() as Real,
        y: sum.y / ring.len() as Real,
    }
}

/// Rotate `ring` so it starts at the vertex best matching `reference[0]`
/// relative to the ring centroids.
fn align_start(reference: &[Coord<Real>], ring: &[Coord<Real>]) -> Vec<Coord<Real>> {
    let (rc, c) = (centroid(reference), centroid(ring));
    let target = Coord {
        x: reference[0].x - rc.x,
        y: reference[0].y - rc.y,
    };
    let start = ring
        .iter()
        .enumerate()
        .map(|(i, p)| (i, (p.x - c.x - target.x).hypot(p.y - c.y - target.y)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(0, |(i, _)| i);
    let mut rotated = ring.to_vec();
    rotated.rotate_left(start);
    rotated
}

/// Normalised arc-length position of every vertex, starting at 0.
fn arc_params(ring: &[Coord<Real>]) -> Vec<Real> {
    let n = ring.len();
    let lengths: Vec<Real> = (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            (b.x - a.x).hypot(b.y - a.y)
        })
        .collect();
    let total: Real = lengths.iter().sum();
    let mut params = Vec::with_capacity(n);
    let mut walked = 0.0;
    for length in lengths {
        params.push(walked / total);
        walked += length;
    }
    params
}

fn merged_params(a: &[Real], b: &[Real]) -> Vec<Real> {
    let mut all: Vec<Real> = a.iter().chain(b).copied().collect();
    all.sort_by(Real::total_cmp);
    all.dedup_by(|x, y| (*x - *y).abs() < PARAM_EPSILON);
    all
}

/// Points along a closed ring at the given normalised arc-length positions.
fn resample(ring: &[Coord<Real>], params: &[Real]) -> Vec<Coord<Real>> {
    let own = arc_params(ring);
    let n = ring.len();
    params
        .iter()
        .map(|&t| {
            // Last vertex whose parameter does not exceed t.
            let i = own.partition_point(|&p| p <= t + PARAM_EPSILON).saturating_sub(1);
            let start = own[i];
            let end = if i + 1 < n { own[i + 1] } else { 1.0 };
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            let f = if end - start > 0.0 {
                ((t - start) / (end - start)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            Coord {
                x: a.x + (b.x - a.x) * f,
                y: a.y + (b.y - a.y) * f,
            }
        })
        .collect()
}

/// Close a stack of matching layers into a solid: side walls between
/// consecutive layers plus a cap on the first and the last layer.
pub(crate) fn stitch_layers(layers: &[Layer]) -> Result<Mesh, ModelError> {
    let (Some(first), Some(last)) = (layers.first(), layers.last()) else {
        return Err(ModelError::DegenerateProfile("no layers to stitch".into()));
    };
    if layers.len() < 2 {
        return Err(ModelError::DegenerateProfile("need at least two layers".into()));
    }
    for layer in layers {
        let same_shape = layer.rings.len() == first.rings.len()
            && layer
                .rings
                .iter()
                .zip(&first.rings)
                .all(|(a, b)| a.len() == b.len() && a.len() >= 3);
        if !same_shape {
            return Err(ModelError::LoftMismatch("layers differ in ring or point count".into()));
        }
    }

    let mut faces: Vec<Vec<Point3<Real>>> = Vec::new();
    for pair in layers.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        for (ring_a, ring_b) in lower.rings.iter().zip(&upper.rings) {
            let n = ring_a.len();
            for i in 0..n {
                let j = (i + 1) % n;
                let a_i = Point3::new(ring_a[i].x, ring_a[i].y, lower.z);
                let a_j = Point3::new(ring_a[j].x, ring_a[j].y, lower.z);
                let b_i = Point3::new(ring_b[i].x, ring_b[i].y, upper.z);
                let b_j = Point3::new(ring_b[j].x, ring_b[j].y, upper.z);
                faces.push(vec![a_i, a_j, b_j]);
                faces.push(vec![a_i, b_j, b_i]);
            }
        }
    }
    faces.extend(cap(first, false));
    faces.extend(cap(last, true));

    Ok(Mesh::from_faces(faces))
}

/// Earcut triangulation of a layer, facing +Z when `up`, else -Z.
fn cap(layer: &Layer, up: bool) -> Vec<Vec<Point3<Real>>> {
    let mut rings = layer.rings.iter().map(|ring| {
        let mut coords = ring.clone();
        coords.dedup_by(|a, b| (a.x - b.x).hypot(a.y - b.y) < 1e-12);
        LineString::from(coords)
    });
    let Some(exterior) = rings.next() else {
        return Vec::new();
    };
    let polygon = Polygon::new(exterior, rings.collect());

    polygon
        .earcut_triangles()
        .into_iter()
        .map(|triangle| {
            let [a, b, c] = triangle.to_array();
            let ccw = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) > 0.0;
            let ordered = if ccw == up { [a, b, c] } else { [a, c, b] };
            ordered
                .iter()
                .map(|p| Point3::new(p.x, p.y, layer.z))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: Real) -> Vec<Coord<Real>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: size, y: 0.0 },
            Coord { x: size, y: size },
            Coord { x: 0.0, y: size },
        ]
    }

    #[test]
    fn merged_params_keep_every_corner() {
        let merged = merged_params(&[0.0, 0.25, 0.5, 0.75], &[0.0, 0.5, 0.6]);
        assert_eq!(merged, vec![0.0, 0.25, 0.5, 0.6, 0.75]);
    }

    #[test]
    fn resample_hits_vertices_and_midpoints() {
        let ring = square(2.0);
        let points = resample(&ring, &[0.0, 0.125, 0.25, 0.875]);
        assert_eq!(points[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(points[1], Coord { x: 1.0, y: 0.0 });
        assert_eq!(points[2], Coord { x: 2.0, y: 0.0 });
        assert_eq!(points[3], Coord { x: 0.0, y: 1.0 });
    }

    #[test]
    fn align_start_picks_matching_corner() {
        let reference = square(1.0);
        let mut rotated = square(1.0);
        rotated.rotate_left(2);
        assert_eq!(align_start(&reference, &rotated), reference);
    }

    #[test]
    fn stitched_prism_is_closed() {
        let layer = |z| Layer { z, rings: vec![square(1.0)] };
        let mesh = stitch_layers(&[layer(0.0), layer(0.5), layer(1.0)]).unwrap();
        assert!((mesh.volume() - 1.0).abs() < 1e-12);
    }
}
