//! Hexagonal stick with a round end.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::CSG;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferentialStick {
    /// Corner to corner size of the hexagon.
    pub hex_diameter: Real,
    pub hex_height: Real,
    pub circle_diameter: Real,
    pub circle_height: Real,
}

impl Default for DifferentialStick {
    fn default() -> Self {
        DifferentialStick {
            hex_diameter: 6.0,
            hex_height: 20.0,
            circle_diameter: 6.0,
            circle_height: 20.0,
        }
    }
}

impl DifferentialStick {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("hex_diameter", self.hex_diameter)?;
        require_positive("hex_height", self.hex_height)?;
        require_positive("circle_diameter", self.circle_diameter)?;
        require_positive("circle_height", self.circle_height)
    }
}

impl Part for DifferentialStick {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "hexagonal prism topped by a cylinder"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let hex = extrude(&Sketch::regular_polygon(self.hex_diameter * 0.5, 6)?, self.hex_height)?;
        let round = extrude(
            &Sketch::circle(self.circle_diameter * 0.5, quality.segments)?,
            self.circle_height,
        )?
        .translate(0.0, 0.0, self.hex_height);
        Ok(hex + round)
    }
}

impl PartParams for DifferentialStick {
    const NAME: &'static str = "differential_stick";
}
