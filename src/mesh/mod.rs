//! `Mesh` struct and implementations of the `CSG` trait for `Mesh`

use crate::aabb::Aabb;
use crate::float_types::{Real, tolerance};
use crate::mesh::{bsp::Node, polygon::Polygon, vertex::Vertex};
use crate::traits::CSG;
use nalgebra::{Matrix4, Point3, Vector3};
use std::ops::{Add, AddAssign, BitAnd, Sub, SubAssign};
use std::sync::OnceLock;
use tracing::debug;

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed solid stored as a soup of convex planar polygons.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Self::from_polygon_vec(polygons.to_vec())
    }

    pub(crate) fn from_polygon_vec(polygons: Vec<Polygon>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a mesh from convex faces given as point loops, counter-clockwise
    /// seen from outside. Faces without area are skipped.
    pub fn from_faces<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = Vec<Point3<Real>>>,
    {
        Self::from_polygon_vec(
            faces
                .into_iter()
                .filter_map(|face| Polygon::from_points(&face))
                .collect(),
        )
    }

    /// Put several solids into one mesh without merging them.
    ///
    /// Overlapping members stay overlapping; exporters write them as
    /// separate shells of one file.
    pub fn compound<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Mesh>,
    {
        Self::from_polygon_vec(parts.into_iter().flat_map(|m| m.polygons).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices from the mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Number of triangles the mesh exports as.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    /// All polygons fan-triangulated into position triples.
    pub fn triangles(&self) -> Vec<[Point3<Real>; 3]> {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| [a.pos, b.pos, c.pos])
            .collect()
    }

    /// Signed enclosed volume (divergence theorem). Positive for outward
    /// facing polygons.
    pub fn volume(&self) -> Real {
        self.triangles()
            .iter()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Point-in-solid test by ray parity.
    ///
    /// The ray direction is deliberately skewed so it does not run along
    /// the axis-aligned edges and faces most parts consist of.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        if !self.bounding_box().contains(point) {
            return false;
        }
        let direction = Vector3::new(0.3141, 0.7071, 0.6335).normalize();
        let hits = self
            .triangles()
            .iter()
            .filter(|triangle| ray_hits_triangle(point, &direction, triangle))
            .count();
        hits % 2 == 1
    }

    /// True when the bounding boxes of both meshes cannot touch, so the
    /// booleans reduce to concatenation.
    fn disjoint_from(&self, other: &Mesh) -> bool {
        !self
            .bounding_box()
            .intersects(&other.bounding_box(), tolerance())
    }
}

/// Möller–Trumbore ray/triangle intersection, counting hits in front of the origin only.
fn ray_hits_triangle(
    origin: &Point3<Real>,
    direction: &Vector3<Real>,
    [a, b, c]: &[Point3<Real>; 3],
) -> bool {
    let eps = 1e-12;
    let edge1 = b - a;
    let edge2 = c - a;
    let h = direction.cross(&edge2);
    let det = edge1.dot(&h);
    if det.abs() < eps {
        return false;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return false;
    }
    let q = s.cross(&edge1);
    let v = inv_det * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }
    inv_det * edge2.dot(&q) > eps
}

impl CSG for Mesh {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh::default()
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh) -> Mesh {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        if self.disjoint_from(other) {
            debug!("union of disjoint solids, concatenating polygons");
            return Mesh::compound([self.clone(), other.clone()]);
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Mesh::from_polygon_vec(a.all_polygons())
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +----+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh) -> Mesh {
        if self.is_empty() || other.is_empty() || self.disjoint_from(other) {
            debug!("difference with a disjoint or empty cutter, keeping the left operand");
            return self.clone();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        Mesh::from_polygon_vec(a.all_polygons())
    }

    /// Return a new Mesh representing intersection of the two Meshes.
    ///
    /// ```text
    /// let c = a.intersect(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Mesh) -> Mesh {
        if self.is_empty() || other.is_empty() || self.disjoint_from(other) {
            return Mesh::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Mesh::from_polygon_vec(a.all_polygons())
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Planes are recomputed from the moved vertices. A transform with a
    /// negative determinant (a mirror) reverses every vertex loop so faces
    /// keep pointing outwards. Polygons collapsed by a singular matrix are dropped.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let mirrors = mat.fixed_view::<3, 3>(0, 0).determinant() < 0.0;
        let polygons = self
            .polygons
            .iter()
            .filter_map(|poly| {
                let mut vertices: Vec<Vertex> = poly
                    .vertices
                    .iter()
                    .map(|v| Vertex::new(mat.transform_point(&v.pos), v.normal))
                    .collect();
                if mirrors {
                    vertices.reverse();
                }
                Polygon::from_vertices(vertices)
            })
            .collect();
        Mesh::from_polygon_vec(polygons)
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `polygons`.
    /// An empty mesh reports a point box at the origin.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(self.polygons.iter().flat_map(|p| p.vertices.iter().map(|v| &v.pos)))
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh {
        let mut mesh = self.clone();
        mesh.polygons.iter_mut().for_each(Polygon::flip);
        mesh.bounding_box = OnceLock::new();
        mesh
    }
}

macro_rules! impl_boolean_op {
    ($trait:ident, $method:ident, $csg:ident) => {
        impl $trait<&Mesh> for &Mesh {
            type Output = Mesh;
            fn $method(self, rhs: &Mesh) -> Mesh {
                self.$csg(rhs)
            }
        }

        impl $trait<&Mesh> for Mesh {
            type Output = Mesh;
            fn $method(self, rhs: &Mesh) -> Mesh {
                self.$csg(rhs)
            }
        }

        impl $trait<Mesh> for Mesh {
            type Output = Mesh;
            fn $method(self, rhs: Mesh) -> Mesh {
                self.$csg(&rhs)
            }
        }

        impl $trait<Mesh> for &Mesh {
            type Output = Mesh;
            fn $method(self, rhs: Mesh) -> Mesh {
                self.$csg(&rhs)
            }
        }
    };
}

impl_boolean_op!(Add, add, union);
impl_boolean_op!(Sub, sub, difference);
impl_boolean_op!(BitAnd, bitand, intersection);

impl AddAssign<&Mesh> for Mesh {
    fn add_assign(&mut self, rhs: &Mesh) {
        *self = self.union(rhs);
    }
}

impl SubAssign<&Mesh> for Mesh {
    fn sub_assign(&mut self, rhs: &Mesh) {
        *self = self.difference(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_only_forward() {
        let triangle = [
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let up = Vector3::z();
        assert!(ray_hits_triangle(&Point3::origin(), &up, &triangle));
        assert!(!ray_hits_triangle(&Point3::origin(), &-up, &triangle));
        assert!(!ray_hits_triangle(&Point3::new(5.0, 0.0, 0.0), &up, &triangle));
    }
}
