//! Struct and functions for working with planar `Polygon`s

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// A convex, planar polygon. Vertices are ordered counter-clockwise when
/// seen from the side the plane normal points to.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Create a polygon, deriving its plane from the vertices.
    ///
    /// Returns `None` for fewer than three vertices or an outline without
    /// area. Vertex normals are replaced by the plane normal so exported
    /// facets stay flat shaded.
    pub fn from_vertices(mut vertices: Vec<Vertex>) -> Option<Self> {
        let plane = Plane::from_vertices(&vertices)?;
        for vertex in &mut vertices {
            vertex.normal = plane.normal;
        }
        Some(Polygon { vertices, plane })
    }

    pub fn from_points(points: &[Point3<Real>]) -> Option<Self> {
        Self::from_vertices(
            points
                .iter()
                .map(|p| Vertex::new(*p, Vector3::zeros()))
                .collect(),
        )
    }

    /// Build a polygon whose plane is already known, e.g. the fragment of a split.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        Polygon { vertices, plane }
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(|v| v.flip());
        self.plane.flip();
    }

    /// Fan triangulation, valid because stored polygons are convex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let Some((first, rest)) = self.vertices.split_first() else {
            return Vec::new();
        };
        rest.windows(2)
            .map(|pair| [first.clone(), pair[0].clone(), pair[1].clone()])
            .collect()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| &v.pos))
    }

    /// Area of the polygon.
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() * 0.5)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_collinear_outline() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(Polygon::from_points(&points).is_none());
    }

    #[test]
    fn square_area_and_normal() {
        let points = [
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 2.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
        ];
        let mut polygon = Polygon::from_points(&points).unwrap();
        assert!((polygon.area() - 4.0).abs() < 1e-12);
        assert!((polygon.plane.normal - Vector3::z()).norm() < 1e-12);
        assert!((polygon.plane.w - 1.0).abs() < 1e-12);
        assert_eq!(polygon.triangulate().len(), 2);

        polygon.flip();
        assert!((polygon.plane.normal + Vector3::z()).norm() < 1e-12);
        assert_eq!(polygon.vertices[0].pos, points[3]);
    }
}
