//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use printparts::{
    float_types::{PI, Real},
    mesh::{Mesh, polygon::Polygon},
    parts::Quality,
};
use nalgebra::Point3;

/// Coarse tessellation keeping the part tests fast.
pub const TEST_QUALITY: Quality = Quality { segments: 24 };

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box(polygons: &[Polygon]) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for poly in polygons {
        for v in &poly.vertices {
            let p = v.pos;
            for (axis, value) in [p.x, p.y, p.z].into_iter().enumerate() {
                bb[axis] = bb[axis].min(value);
                bb[axis + 3] = bb[axis + 3].max(value);
            }
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Area of a regular `segments`-gon inscribed in a circle of `radius`.
pub fn ngon_area(radius: Real, segments: usize) -> Real {
    let n = segments as Real;
    0.5 * n * radius * radius * (2.0 * PI / n).sin()
}

/// Checks that every edge of the mesh is shared by exactly two triangles
/// running in opposite directions, comparing positions exactly.
pub fn is_closed(mesh: &Mesh) -> bool {
    use std::collections::HashMap;

    let key = |p: &Point3<Real>| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
    let mut edges: HashMap<([u64; 3], [u64; 3]), i32> = HashMap::new();
    for tri in mesh.triangles() {
        for i in 0..3 {
            let (a, b) = (key(&tri[i]), key(&tri[(i + 1) % 3]));
            if a <= b {
                *edges.entry((a, b)).or_default() += 1;
            } else {
                *edges.entry((b, a)).or_default() -= 1;
            }
        }
    }
    edges.values().all(|&balance| balance == 0)
}

/// Checks that every polygon is planar and convex against its own plane,
/// skipping edges too short to carry a direction.
pub fn all_convex_and_planar(mesh: &Mesh, eps: Real) -> bool {
    mesh.polygons.iter().all(|poly| {
        let n = poly.plane.normal;
        let points: Vec<Point3<Real>> = poly.vertices.iter().map(|v| v.pos).collect();
        let planar = points.iter().all(|p| poly.plane.signed_distance(p).abs() < eps);
        let count = points.len();
        let convex = (0..count).all(|i| {
            let a = points[(i + 1) % count] - points[i];
            let b = points[(i + 2) % count] - points[(i + 1) % count];
            let scale = a.norm() * b.norm();
            scale < 1e-12 || a.cross(&b).dot(&n) / scale > -eps
        });
        planar && convex
    })
}
