//! Starting point for new parts: a block with a dent cut along each long side.

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
pub struct TemplateBlock {
    pub box_width: Real,
    pub box_length: Real,
    pub base_height: Real,
    /// Height of the dent floor above the bottom.
    pub dent_z: Real,
    pub dent_depth: Real,
    pub dent_height: Real,
}

impl Default for TemplateBlock {
    fn default() -> Self {
        TemplateBlock {
            box_width: 2.0,
            box_length: 0.5,
            base_height: 1.0,
            dent_z: 0.3,
            dent_depth: 0.15,
            dent_height: 0.2,
        }
    }
}

impl TemplateBlock {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("box_width", self.box_width)?;
        require_positive("box_length", self.box_length)?;
        require_positive("base_height", self.base_height)?;
        require_positive("dent_depth", self.dent_depth)?;
        require_positive("dent_height", self.dent_height)?;
        if self.dent_depth * 2.0 >= self.box_length {
            return Err(ModelError::invalid("dent_depth", "the two dents would cut the block in half"));
        }
        if self.dent_z < 0.0 || self.dent_z + self.dent_height > self.base_height {
            return Err(ModelError::invalid("dent_z", "dents must lie within the block height"));
        }
        Ok(())
    }

    fn dent(&self) -> Result<Mesh, ModelError> {
        extrude(&Sketch::rectangle(self.box_width, self.dent_depth)?, self.dent_height)
    }
}

impl Part for TemplateBlock {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "model template: block with two side dents"
    }

    fn build(&self, _quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let base = extrude(&Sketch::rectangle(self.box_width, self.box_length)?, self.base_height)?;
        let offset = self.box_length * 0.5 - self.dent_depth * 0.5;
        let dent_left = self.dent()?.translate(0.0, -offset, self.dent_z);
        let dent_right = self.dent()?.translate(0.0, offset, self.dent_z);
        Ok(base - dent_left - dent_right)
    }
}

impl PartParams for TemplateBlock {
    const NAME: &'static str = "template_block";
}
