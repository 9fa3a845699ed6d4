//! Replacement saddle for an acoustic guitar bridge.
//!
//! A fully rounded bar sits on a lower bar rounded only at its vertical
//! edges, which keeps the bottom flat. A wedge is cut from the underside so
//! the saddle gets lower towards one end.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude_on;
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::{Sketch, Workplane};
use crate::traits::CSG;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuitarSaddle {
    pub box_width: Real,
    pub box_length: Real,
    pub second_length: Real,
    pub base_height: Real,
    /// Height removed at the low end of the wedge.
    pub cutout_height: Real,
    pub second_height: Real,
    pub fillet_radius: Real,
}

impl Default for GuitarSaddle {
    fn default() -> Self {
        GuitarSaddle {
            box_width: 79.0,
            box_length: 2.9,
            second_length: 2.9,
            base_height: 7.0,
            cutout_height: 1.0,
            second_height: 2.66,
            fillet_radius: 1.44,
        }
    }
}

impl GuitarSaddle {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("box_width", self.box_width)?;
        require_positive("box_length", self.box_length)?;
        require_positive("second_length", self.second_length)?;
        require_positive("base_height", self.base_height)?;
        require_positive("cutout_height", self.cutout_height)?;
        require_positive("second_height", self.second_height)?;
        require_positive("fillet_radius", self.fillet_radius)?;
        if self.cutout_height >= self.base_height {
            return Err(ModelError::invalid(
                "cutout_height",
                format!("wedge of {} would cut through the {} high saddle", self.cutout_height, self.base_height),
            ));
        }
        Ok(())
    }
}

impl Part for GuitarSaddle {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "filleted saddle bar on a flat base with a tapered wedge cut"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;

        let base = extrude_filleted(
            &Sketch::rectangle(self.box_width, self.box_length)?,
            self.base_height,
            self.fillet_radius,
            EdgeSelection::All,
            segments,
        )?;
        let second = extrude_filleted(
            &Sketch::rectangle(self.box_width, self.second_length)?,
            self.second_height,
            self.fillet_radius,
            EdgeSelection::Vertical,
            segments,
        )?;

        // Triangle in XZ: zero height at one end, `cutout_height` at the other.
        let depth = self.box_length + self.second_length;
        let wedge = Sketch::polygon(&[
            [0.0, 0.0],
            [self.box_width, 0.0],
            [self.box_width, self.cutout_height],
        ])?
        .centered();
        let cutout = extrude_on(&wedge, &Workplane::XZ, depth)?.translate(
            0.0,
            self.box_length,
            self.cutout_height * 0.5,
        );

        Ok((base + second) - cutout)
    }
}

impl PartParams for GuitarSaddle {
    const NAME: &'static str = "guitar_saddle";
}
