//! Oriented planes and the polygon splitting used by the BSP tree.

use crate::float_types::{Real, tolerance};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Plane classification bit flags
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane `normal · p = w` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal.
    /// Returns `None` for a zero normal.
    pub fn from_normal_and_point(normal: Vector3<Real>, point: &Point3<Real>) -> Option<Self> {
        let normal = normal.try_normalize(Real::EPSILON)?;
        Some(Plane {
            w: normal.dot(&point.coords),
            normal,
        })
    }

    /// Plane through three points, oriented by the right-hand rule.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Option<Self> {
        Self::from_normal_and_point((b - a).cross(&(c - a)), a)
    }

    /// Best fit plane of a polygon outline.
    ///
    /// The normal comes from Newell's method, which stays well defined for
    /// n-gons whose first three vertices happen to be collinear, and the
    /// offset goes through the vertex centroid. `None` when the outline
    /// encloses no area.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for (current, next) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
            let (c, n) = (&current.pos, &next.pos);
            normal.x += (c.y - n.y) * (c.z + n.z);
            normal.y += (c.z - n.z) * (c.x + n.x);
            normal.z += (c.x - n.x) * (c.y + n.y);
            centroid += c.coords;
        }
        // Twice the enclosed area; reject slivers below the classification tolerance.
        if normal.norm() <= tolerance() * tolerance() {
            return None;
        }
        centroid /= vertices.len() as Real;
        Self::from_normal_and_point(normal, &Point3::from(centroid))
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and offset)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        let eps = tolerance();
        if t < -eps {
            BACK
        } else if t > eps {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Coplanar polygons go to `coplanar_front` when they face the same way
    /// as this plane. Split pieces keep the plane of the original polygon.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|vertex| self.orient_point(&vertex.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(count + 1);
                let mut split_back = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }

                    // The edge crosses the plane, both halves get the intersection point.
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                        let intersection = vertex_i.interpolate(vertex_j, t);
                        split_front.push(intersection.clone());
                        split_back.push(intersection);
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(split_front, polygon.plane.clone()));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(split_back, polygon.plane.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
