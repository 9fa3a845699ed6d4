//! Stepped spacer: a cylinder with a lofted taper on top and a through bore.

use crate::errors::{ModelError, require_positive};
use crate::extrude::{extrude, loft};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::CSG;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wl1865 {
    pub outer_diameter_bottom: Real,
    pub outer_diameter_top: Real,
    pub inner_diameter: Real,
    pub height: Real,
}

impl Default for Wl1865 {
    fn default() -> Self {
        Wl1865 {
            outer_diameter_bottom: 6.0,
            outer_diameter_top: 5.0,
            inner_diameter: 3.0,
            height: 4.5,
        }
    }
}

impl Wl1865 {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("outer_diameter_bottom", self.outer_diameter_bottom)?;
        require_positive("outer_diameter_top", self.outer_diameter_top)?;
        require_positive("inner_diameter", self.inner_diameter)?;
        require_positive("height", self.height)?;
        if self.inner_diameter >= self.outer_diameter_bottom.min(self.outer_diameter_top) {
            return Err(ModelError::invalid(
                "inner_diameter",
                format!("bore {} cuts through the spacer wall", self.inner_diameter),
            ));
        }
        Ok(())
    }
}

impl Part for Wl1865 {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "stepped spacer: cylinder bottom, tapered top, through bore"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;
        let half = self.height * 0.5;
        let bottom_circle = Sketch::circle(self.outer_diameter_bottom * 0.5, segments)?;

        let outer_bottom = extrude(&bottom_circle, half)?;
        let outer_top = loft(
            &bottom_circle,
            &Sketch::circle(self.outer_diameter_top * 0.5, segments)?,
            half,
        )?
        .translate(0.0, 0.0, half);
        let inner = extrude(&Sketch::circle(self.inner_diameter * 0.5, segments)?, self.height)?;

        Ok((outer_bottom + outer_top) - inner)
    }
}

impl PartParams for Wl1865 {
    const NAME: &'static str = "wl_1865";
}
