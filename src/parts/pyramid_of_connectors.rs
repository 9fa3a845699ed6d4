//! Batch print layout: copies of an imported connector stacked into a
//! stepped pyramid of square layers.

use crate::errors::{ModelError, require_positive};
use crate::float_types::Real;
use crate::io::{IoError, load_stl};
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::traits::CSG;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidOfConnectors {
    /// STL file of a single connector.
    pub source: Option<PathBuf>,
    /// Size of one connector after it is stood up.
    pub part_x: Real,
    pub part_y: Real,
    pub part_z: Real,
    /// Gap between neighbouring copies.
    pub spacing: Real,
    /// Copies per side of each layer, bottom first.
    pub layers: Vec<usize>,
}

impl Default for PyramidOfConnectors {
    fn default() -> Self {
        PyramidOfConnectors {
            source: None,
            part_x: 7.0,
            part_y: 7.0,
            part_z: 17.0,
            spacing: 0.5,
            layers: vec![4, 3, 2, 1],
        }
    }
}

impl PyramidOfConnectors {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("part_x", self.part_x)?;
        require_positive("part_y", self.part_y)?;
        require_positive("part_z", self.part_z)?;
        if !(self.spacing >= 0.0) {
            return Err(ModelError::invalid("spacing", "must not be negative"));
        }
        if self.layers.is_empty() || self.layers.contains(&0) {
            return Err(ModelError::invalid("layers", "need at least one non empty layer"));
        }
        Ok(())
    }

    fn load_connector(&self) -> Result<Mesh, ModelError> {
        let Some(path) = &self.source else {
            return Err(ModelError::MissingInput("no connector STL configured (set `source`)".into()));
        };
        match load_stl(path) {
            Ok(mesh) if mesh.is_empty() => Err(ModelError::Input(format!("{} has no facets", path.display()))),
            Ok(mesh) => Ok(mesh),
            Err(IoError::FileNotFound { path }) => {
                Err(ModelError::MissingInput(format!("connector STL {} not found", path.display())))
            },
            Err(e) => Err(ModelError::Input(e.to_string())),
        }
    }

    /// Origins of every copy, layer by layer, each layer centered on the Z axis.
    pub fn positions(&self) -> Vec<[Real; 3]> {
        let (x_step, y_step) = (self.part_x + self.spacing, self.part_y + self.spacing);
        let mut positions = Vec::with_capacity(self.layers.iter().map(|n| n * n).sum());
        let mut z = 0.0;
        for &size in &self.layers {
            let start_x = -(size.saturating_sub(1) as Real) * x_step * 0.5;
            let start_y = -(size.saturating_sub(1) as Real) * y_step * 0.5;
            for row in 0..size {
                for col in 0..size {
                    positions.push([start_x + col as Real * x_step, start_y + row as Real * y_step, z]);
                }
            }
            z += self.part_z + self.spacing;
        }
        positions
    }
}

impl Part for PyramidOfConnectors {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "imported connector STL stacked in a 4x4, 3x3, 2x2, 1x1 pyramid"
    }

    fn build(&self, _quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let connector = self.load_connector()?.rotate(90.0, 0.0, 0.0);
        let positions = self.positions();
        debug!(copies = positions.len(), "stacking connectors");
        Ok(Mesh::compound(
            positions.into_iter().map(|[x, y, z]| connector.translate(x, y, z)),
        ))
    }
}

impl PartParams for PyramidOfConnectors {
    const NAME: &'static str = "pyramid_of_connectors";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_are_centered_and_stacked() {
        let positions = PyramidOfConnectors::default().positions();
        assert_eq!(positions.len(), 16 + 9 + 4 + 1);
        assert_eq!(positions[0], [-11.25, -11.25, 0.0]);
        assert_eq!(positions[29], [0.0, 0.0, 3.0 * 17.5]);
    }

    #[test]
    fn missing_source_is_reported() {
        let part = PyramidOfConnectors::default();
        assert!(matches!(part.build(&Quality::default()), Err(ModelError::MissingInput(_))));
    }
}
