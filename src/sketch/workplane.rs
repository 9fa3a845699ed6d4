//! Sketch planes placed in model space.

use crate::float_types::Real;
use nalgebra::{Matrix4, Point3, Vector3};

/// An oriented plane that sketches are drawn on.
///
/// Sketch `x` follows `x_dir`, sketch `y` follows `normal × x_dir`, and
/// extrusions grow along `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Workplane {
    pub origin: Point3<Real>,
    pub x_dir: Vector3<Real>,
    pub normal: Vector3<Real>,
}

impl Workplane {
    pub const XY: Workplane = Workplane::new_const([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    /// Front plane: sketch `y` is world +Z and extrusion goes towards -Y.
    pub const XZ: Workplane = Workplane::new_const([1.0, 0.0, 0.0], [0.0, -1.0, 0.0]);
    /// Side plane: sketch `x` is world +Y, sketch `y` is world +Z, extrusion goes towards +X.
    pub const YZ: Workplane = Workplane::new_const([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);

    const fn new_const(x_dir: [Real; 3], normal: [Real; 3]) -> Self {
        Workplane {
            origin: Point3::new(0.0, 0.0, 0.0),
            x_dir: Vector3::new(x_dir[0], x_dir[1], x_dir[2]),
            normal: Vector3::new(normal[0], normal[1], normal[2]),
        }
    }

    pub fn y_dir(&self) -> Vector3<Real> {
        self.normal.cross(&self.x_dir)
    }

    /// The same plane shifted `distance` along its normal.
    pub fn offset(&self, distance: Real) -> Workplane {
        Workplane {
            origin: self.origin + self.normal * distance,
            ..self.clone()
        }
    }

    /// The same orientation with the origin moved to `(x, y, z)`.
    pub fn at(&self, x: Real, y: Real, z: Real) -> Workplane {
        Workplane {
            origin: Point3::new(x, y, z),
            ..self.clone()
        }
    }

    /// Matrix mapping sketch coordinates `(u, v, w)` (with `w` along the
    /// normal) to model space.
    pub fn to_matrix(&self) -> Matrix4<Real> {
        let y = self.y_dir();
        Matrix4::new(
            self.x_dir.x, y.x, self.normal.x, self.origin.x,
            self.x_dir.y, y.y, self.normal.y, self.origin.y,
            self.x_dir.z, y.z, self.normal.z, self.origin.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn to_world(&self, u: Real, v: Real, w: Real) -> Point3<Real> {
        self.origin + self.x_dir * u + self.y_dir() * v + self.normal * w
    }
}

impl Default for Workplane {
    fn default() -> Self {
        Workplane::XY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_plane_maps_sketch_y_to_z() {
        let p = Workplane::XZ.to_world(1.0, 2.0, 3.0);
        assert_eq!(p, Point3::new(1.0, -3.0, 2.0));
        let m = Workplane::XZ.to_matrix();
        assert_eq!(m.transform_point(&Point3::new(1.0, 2.0, 3.0)), p);
    }

    #[test]
    fn side_plane_axes() {
        let p = Workplane::YZ.offset(-2.0).to_world(1.0, 2.0, 3.0);
        assert_eq!(p, Point3::new(1.0, 1.0, 2.0));
    }
}
