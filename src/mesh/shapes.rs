//! 3D Shapes as `Mesh`s

use crate::errors::{ModelError, require_positive};
use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use crate::traits::CSG;
use nalgebra::{Point3, Vector3};

/// Placement of a primitive along one axis relative to the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// The shape starts at the origin and extends in the positive direction.
    Min,
    #[default]
    Center,
    /// The shape ends at the origin.
    Max,
}

impl Align {
    /// Shift that moves a shape spanning `[-size/2, size/2]` into this alignment.
    pub fn shift(self, size: Real) -> Real {
        match self {
            Align::Min => size * 0.5,
            Align::Center => 0.0,
            Align::Max => -size * 0.5,
        }
    }
}

/// Per-axis alignment of a primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Align3 {
    pub x: Align,
    pub y: Align,
    pub z: Align,
}

impl Align3 {
    pub const CENTER: Align3 = Align3::new(Align::Center, Align::Center, Align::Center);
    /// Centered in X and Y, resting on the XY plane.
    pub const BOTTOM: Align3 = Align3::new(Align::Center, Align::Center, Align::Min);
    pub const MIN: Align3 = Align3::new(Align::Min, Align::Min, Align::Min);

    pub const fn new(x: Align, y: Align, z: Align) -> Self {
        Align3 { x, y, z }
    }

    fn shift(&self, size: Vector3<Real>) -> Vector3<Real> {
        Vector3::new(self.x.shift(size.x), self.y.shift(size.y), self.z.shift(size.z))
    }
}

fn require_segments(segments: usize) -> Result<(), ModelError> {
    if segments < 3 {
        return Err(ModelError::invalid(
            "segments",
            format!("need at least 3 segments, got {segments}"),
        ));
    }
    Ok(())
}

impl Mesh {
    /// Create a right prism (a box) with the given edge lengths.
    ///
    /// # Example
    /// ```
    /// use printparts::mesh::{Mesh, shapes::Align3};
    /// let plate = Mesh::cuboid(80.0, 65.0, 6.0, Align3::BOTTOM).unwrap();
    /// assert!((plate.volume() - 80.0 * 65.0 * 6.0).abs() < 1e-9);
    /// ```
    pub fn cuboid(width: Real, length: Real, height: Real, align: Align3) -> Result<Mesh, ModelError> {
        require_positive("width", width)?;
        require_positive("length", length)?;
        require_positive("height", height)?;

        let (hx, hy, hz) = (width * 0.5, length * 0.5, height * 0.5);
        let p = [
            Point3::new(-hx, -hy, -hz),
            Point3::new(hx, -hy, -hz),
            Point3::new(hx, hy, -hz),
            Point3::new(-hx, hy, -hz),
            Point3::new(-hx, -hy, hz),
            Point3::new(hx, -hy, hz),
            Point3::new(hx, hy, hz),
            Point3::new(-hx, hy, hz),
        ];
        let faces: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front
            [3, 7, 6, 2], // back
            [0, 4, 7, 3], // left
            [1, 2, 6, 5], // right
        ];
        let mesh = Mesh::from_faces(faces.iter().map(|f| f.iter().map(|&i| p[i]).collect()));
        Ok(mesh.translate_vector(align.shift(Vector3::new(width, length, height))))
    }

    /// Cube with all edges `size` long.
    pub fn cube(size: Real, align: Align3) -> Result<Mesh, ModelError> {
        Self::cuboid(size, size, size, align)
    }

    /// Cylinder along Z approximated by a `segments`-sided prism.
    pub fn cylinder(radius: Real, height: Real, segments: usize, align: Align3) -> Result<Mesh, ModelError> {
        Self::cone(radius, radius, height, segments, align)
    }

    /// Truncated cone along Z. Either radius may be zero, which collapses
    /// that end into an apex.
    pub fn cone(
        bottom_radius: Real,
        top_radius: Real,
        height: Real,
        segments: usize,
        align: Align3,
    ) -> Result<Mesh, ModelError> {
        require_positive("height", height)?;
        require_segments(segments)?;
        if !(bottom_radius >= 0.0 && top_radius >= 0.0) || bottom_radius.max(top_radius) <= 0.0 {
            return Err(ModelError::invalid(
                "radius",
                format!("radii must be non negative and not both zero, got {bottom_radius} and {top_radius}"),
            ));
        }

        let half = height * 0.5;
        let ring = |radius: Real, z: Real| -> Vec<Point3<Real>> {
            (0..segments)
                .map(|i| {
                    let angle = TAU * i as Real / segments as Real;
                    Point3::new(radius * angle.cos(), radius * angle.sin(), z)
                })
                .collect()
        };
        let bottom = ring(bottom_radius, -half);
        let top = ring(top_radius, half);
        let bottom_apex = Point3::new(0.0, 0.0, -half);
        let top_apex = Point3::new(0.0, 0.0, half);

        let mut faces: Vec<Vec<Point3<Real>>> = Vec::with_capacity(segments + 2);
        for i in 0..segments {
            let j = (i + 1) % segments;
            let face = if bottom_radius <= 0.0 {
                vec![bottom_apex, top[j], top[i]]
            } else if top_radius <= 0.0 {
                vec![bottom[i], bottom[j], top_apex]
            } else {
                vec![bottom[i], bottom[j], top[j], top[i]]
            };
            faces.push(face);
        }
        if top_radius > 0.0 {
            faces.push(top);
        }
        if bottom_radius > 0.0 {
            faces.push(bottom.into_iter().rev().collect());
        }

        let diameter = 2.0 * bottom_radius.max(top_radius);
        let mesh = Mesh::from_faces(faces);
        Ok(mesh.translate_vector(align.shift(Vector3::new(diameter, diameter, height))))
    }

    /// UV sphere centered on the origin with `segments` slices and `stacks` bands.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> Result<Mesh, ModelError> {
        require_positive("radius", radius)?;
        require_segments(segments)?;
        if stacks < 2 {
            return Err(ModelError::invalid("stacks", format!("need at least 2 stacks, got {stacks}")));
        }

        let point = |stack: usize, slice: usize| {
            let phi = PI * stack as Real / stacks as Real;
            let theta = TAU * (slice % segments) as Real / segments as Real;
            Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            )
        };
        let north = Point3::new(0.0, 0.0, radius);
        let south = Point3::new(0.0, 0.0, -radius);

        let mut faces = Vec::with_capacity(segments * stacks);
        for j in 0..stacks {
            for i in 0..segments {
                let face = if j == 0 {
                    vec![north, point(1, i), point(1, i + 1)]
                } else if j == stacks - 1 {
                    vec![point(j, i), south, point(j, i + 1)]
                } else {
                    vec![point(j, i), point(j + 1, i), point(j + 1, i + 1), point(j, i + 1)]
                };
                faces.push(face);
            }
        }
        Ok(Mesh::from_faces(faces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_shifts() {
        let boxed = Mesh::cuboid(2.0, 4.0, 6.0, Align3::MIN).unwrap();
        let bb = boxed.bounding_box();
        assert_eq!(bb.mins, Point3::origin());
        assert_eq!(bb.maxs, Point3::new(2.0, 4.0, 6.0));

        let above = Mesh::cylinder(1.0, 3.0, 12, Align3::BOTTOM).unwrap();
        assert!(above.bounding_box().mins.z.abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Mesh::cuboid(0.0, 1.0, 1.0, Align3::CENTER).is_err());
        assert!(Mesh::cylinder(1.0, 1.0, 2, Align3::CENTER).is_err());
        assert!(Mesh::cone(0.0, 0.0, 1.0, 8, Align3::CENTER).is_err());
    }
}
