//! Tube that slides over a gear shaft, with a radial hole for a locking pin.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::{Axis, CSG};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearSlotter {
    pub outer_diameter: Real,
    pub inner_diameter: Real,
    pub height: Real,
    /// Height of the pin hole axis above the bottom.
    pub hole_z: Real,
    pub hole_diameter: Real,
}

impl Default for GearSlotter {
    fn default() -> Self {
        GearSlotter {
            outer_diameter: 5.0,
            inner_diameter: 3.35,
            height: 8.9,
            hole_z: 2.0,
            hole_diameter: 3.2,
        }
    }
}

impl GearSlotter {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("outer_diameter", self.outer_diameter)?;
        require_positive("inner_diameter", self.inner_diameter)?;
        require_positive("height", self.height)?;
        require_positive("hole_diameter", self.hole_diameter)?;
        if self.inner_diameter >= self.outer_diameter {
            return Err(ModelError::invalid(
                "inner_diameter",
                format!("bore {} leaves no wall in a {} tube", self.inner_diameter, self.outer_diameter),
            ));
        }
        if self.hole_z - self.hole_diameter * 0.5 < 0.0 || self.hole_z + self.hole_diameter * 0.5 > self.height {
            return Err(ModelError::invalid("hole_z", "pin hole must lie within the tube height"));
        }
        Ok(())
    }
}

impl Part for GearSlotter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "tube with a radial pin hole for slotting onto a gear shaft"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;

        let outer = extrude(&Sketch::circle(self.outer_diameter * 0.5, segments)?, self.height)?;
        let inner = extrude(&Sketch::circle(self.inner_diameter * 0.5, segments)?, self.height)?;

        // Drilled from the axis outwards through the -Y wall.
        let hole_length = (self.outer_diameter - self.inner_diameter) * 2.0;
        let hole = extrude(&Sketch::circle(self.hole_diameter * 0.5, segments)?, hole_length)?
            .rotate_about(Axis::X, 90.0)
            .translate(0.0, 0.0, self.hole_z);

        Ok(outer - inner - hole)
    }
}

impl PartParams for GearSlotter {
    const NAME: &'static str = "gear_slotter";
}
