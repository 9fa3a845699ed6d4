//! Polarity marks engraved into battery holders.

use crate::errors::{ModelError, require_positive};
use crate::float_types::Real;
use crate::sketch::Sketch;

fn check(size: Real, stroke: Real) -> Result<(), ModelError> {
    require_positive("size", size)?;
    require_positive("stroke", stroke)?;
    if stroke >= size {
        return Err(ModelError::invalid("stroke", format!("stroke {stroke} must be thinner than the glyph size {size}")));
    }
    Ok(())
}

/// A `+` glyph of `size` across, bars `stroke` wide, centered on the origin.
pub fn plus(size: Real, stroke: Real) -> Result<Sketch, ModelError> {
    check(size, stroke)?;
    Ok(Sketch::rectangle(size, stroke)?.union(&Sketch::rectangle(stroke, size)?))
}

/// A `-` glyph of `size` across, `stroke` high, centered on the origin.
pub fn minus(size: Real, stroke: Real) -> Result<Sketch, ModelError> {
    check(size, stroke)?;
    Sketch::rectangle(size, stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_area_counts_overlap_once() {
        let glyph = plus(5.0, 1.0).unwrap();
        assert!((glyph.area() - 9.0).abs() < 1e-9);
        assert_eq!(glyph.polygons().len(), 1);
    }

    #[test]
    fn minus_is_a_bar() {
        assert!((minus(5.0, 1.0).unwrap().area() - 5.0).abs() < 1e-12);
        assert!(minus(1.0, 1.0).is_err());
    }
}
