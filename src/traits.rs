use crate::aabb::Aabb;
use crate::float_types::{Real, tolerance};
use crate::mesh::plane::Plane;
use nalgebra::{Matrix3, Matrix4, Rotation3, Translation3, Unit, Vector3};

/// Coordinate axes, used to rotate about a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Unit<Vector3<Real>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Boolean operations + transformations
pub trait CSG: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    /// Apply an affine transform. Mirroring transforms keep the outward
    /// orientation of the faces.
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn inverse(&self) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new shape translated so that its bounding-box center is at the origin (0,0,0).
    fn center(&self) -> Self {
        let center = self.bounding_box().center();
        self.translate_vector(-center.coords)
    }

    /// Translates the object so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }

    /// Rotates by x_degrees, y_degrees, z_degrees, applied about X first, then Y, then Z.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

        // Compose them in the desired order
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Rotates about a single coordinate axis through the origin.
    fn rotate_about(&self, axis: Axis, degrees: Real) -> Self {
        let rot = Rotation3::from_axis_angle(&axis.unit(), degrees.to_radians());
        self.transform(&rot.to_homogeneous())
    }

    /// Scales by scale_x, scale_y, scale_z
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Reflect (mirror) about an arbitrary plane `plane`.
    ///
    /// The plane is specified by:
    ///   `plane.normal` = the plane’s normal vector (need not be unit),
    ///   `plane.w`      = the dot-product with that normal for points on the plane (offset).
    fn mirror(&self, plane: Plane) -> Self {
        let len = plane.normal().norm();
        if len < tolerance() {
            // Degenerate plane, nothing to reflect about
            return self.clone();
        }

        let n = plane.normal() / len;
        let w = plane.offset() / len;

        // Translate so the plane crosses the origin
        let offset = n * w;
        let t1 = Translation3::from(-offset).to_homogeneous();

        // R = I - 2 n n^T
        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);

        let t2 = Translation3::from(offset).to_homogeneous();

        self.transform(&(t2 * reflect_4 * t1))
    }
}
