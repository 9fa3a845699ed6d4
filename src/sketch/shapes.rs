//! 2D Shapes as `Sketch`s

use crate::errors::{ModelError, require_positive};
use crate::float_types::{Real, TAU};
use crate::sketch::Sketch;
use geo::{Area, LineString, MultiPolygon, Polygon, line_string};

impl Sketch {
    /// Creates a 2D rectangle centered on the origin.
    ///
    /// # Example
    /// ```
    /// use printparts::sketch::Sketch;
    /// let rect = Sketch::rectangle(79.0, 2.9).unwrap();
    /// assert!((rect.area() - 79.0 * 2.9).abs() < 1e-9);
    /// ```
    pub fn rectangle(width: Real, length: Real) -> Result<Sketch, ModelError> {
        require_positive("width", width)?;
        require_positive("length", length)?;
        let (hx, hy) = (width * 0.5, length * 0.5);
        let outer = line_string![
            (x: -hx, y: -hy),
            (x: hx,  y: -hy),
            (x: hx,  y: hy),
            (x: -hx, y: hy),
            (x: -hx, y: -hy),
        ];
        Ok(Sketch::from_geo(MultiPolygon::new(vec![Polygon::new(outer, vec![])])))
    }

    /// Centered rectangle with all four corners rounded by `corner_radius`.
    pub fn rounded_rectangle(
        width: Real,
        length: Real,
        corner_radius: Real,
        segments: usize,
    ) -> Result<Sketch, ModelError> {
        if corner_radius * 2.0 > width.min(length) {
            return Err(ModelError::FilletTooLarge {
                radius: corner_radius,
                limit: width.min(length) * 0.5,
            });
        }
        Sketch::rectangle(width, length)?.fillet_corners(corner_radius, segments)
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`, the
    /// first vertex on the +X axis.
    pub fn regular_polygon(radius: Real, sides: usize) -> Result<Sketch, ModelError> {
        require_positive("radius", radius)?;
        if sides < 3 {
            return Err(ModelError::invalid("sides", format!("need at least 3 sides, got {sides}")));
        }
        let points: Vec<[Real; 2]> = (0..sides)
            .map(|i| {
                let theta = TAU * (i as Real) / (sides as Real);
                [radius * theta.cos(), radius * theta.sin()]
            })
            .collect();
        Sketch::polygon(&points)
    }

    /// Circle approximated by an inscribed `segments`-gon.
    pub fn circle(radius: Real, segments: usize) -> Result<Sketch, ModelError> {
        Sketch::regular_polygon(radius, segments)
    }

    /// Simple polygon through `points`, in either winding order. The ring
    /// is closed automatically.
    pub fn polygon(points: &[[Real; 2]]) -> Result<Sketch, ModelError> {
        if points.len() < 3 {
            return Err(ModelError::DegenerateProfile(format!(
                "a polygon needs at least 3 points, got {}",
                points.len()
            )));
        }
        let mut coords: Vec<(Real, Real)> = points.iter().map(|p| (p[0], p[1])).collect();
        if coords.first() != coords.last() {
            coords.push(coords[0]);
        }
        let polygon = Polygon::new(LineString::from(coords), vec![]);
        if polygon.unsigned_area() <= Real::EPSILON {
            return Err(ModelError::DegenerateProfile("polygon encloses no area".into()));
        }
        Ok(Sketch::from_geo(MultiPolygon::new(vec![polygon])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_polygon_starts_on_x_axis() {
        let hex = Sketch::regular_polygon(3.0, 6).unwrap();
        let first = hex.polygons()[0].exterior().0[0];
        assert!(first.y.abs() < 1e-12);
        assert!((first.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rounded_rectangle_rejects_oversized_radius() {
        assert!(matches!(
            Sketch::rounded_rectangle(4.0, 2.0, 1.5, 16),
            Err(ModelError::FilletTooLarge { .. })
        ));
    }

    #[test]
    fn polygon_rejects_collinear_points() {
        assert!(Sketch::polygon(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).is_err());
    }
}
