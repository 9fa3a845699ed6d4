//! Axis aligned bounding boxes

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Aabb::new(first, first);
        for p in iter {
            aabb.mins = aabb.mins.inf(p);
            aabb.maxs = aabb.maxs.sup(p);
        }
        Some(aabb)
    }

    /// Overlap test, widened on every side by `margin`.
    #[inline]
    pub fn intersects(&self, other: &Self, margin: Real) -> bool {
        self.maxs.x + margin >= other.mins.x
            && self.mins.x - margin <= other.maxs.x
            && self.maxs.y + margin >= other.mins.y
            && self.mins.y - margin <= other.maxs.y
            && self.maxs.z + margin >= other.mins.z
            && self.mins.z - margin <= other.maxs.z
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// Edge lengths along x, y and z.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    pub fn merged(&self, other: &Self) -> Self {
        Aabb::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }

    pub fn contains(&self, point: &Point3<Real>) -> bool {
        (0..3).all(|i| point[i] >= self.mins[i] && point[i] <= self.maxs[i])
    }
}
