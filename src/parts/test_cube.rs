//! Calibration cube with every edge rounded.

use crate::errors::{ModelError, require_positive};
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::CSG;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestCube {
    pub size: Real,
    pub fillet_radius: Real,
}

impl Default for TestCube {
    fn default() -> Self {
        TestCube {
            size: 1.0,
            fillet_radius: 0.1,
        }
    }
}

impl TestCube {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("size", self.size)?;
        require_positive("fillet_radius", self.fillet_radius)?;
        if self.fillet_radius * 2.0 > self.size {
            return Err(ModelError::FilletTooLarge {
                radius: self.fillet_radius,
                limit: self.size * 0.5,
            });
        }
        Ok(())
    }
}

impl Part for TestCube {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "1 mm cube with all edges filleted"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let cube = extrude_filleted(
            &Sketch::rectangle(self.size, self.size)?,
            self.size,
            self.fillet_radius,
            EdgeSelection::All,
            quality.segments,
        )?;
        Ok(cube.translate(0.0, 0.0, -self.size * 0.5))
    }
}

impl PartParams for TestCube {
    const NAME: &'static str = "test_cube";
}
