//! Flat head trapezoidal screw.

use crate::errors::ModelError;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::screws::ScrewSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screw {
    pub spec: ScrewSpec,
}

impl Part for Screw {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "flat head trapezoidal screw, 8x1.5 by default"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        tracing::debug!(size = %self.spec.size(), length = self.spec.length, "building screw");
        self.spec.build(quality.segments)
    }
}

impl PartParams for Screw {
    const NAME: &'static str = "screw";
}
