//! Curtain rail slider carrying a rounded ring for a curtain hook.

use crate::errors::{ModelError, require_positive};
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::curtain_blocker::Slider;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::{Axis, CSG};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainHolder {
    pub slider: Slider,
    /// Center line radius of the ring.
    pub ring_radius: Real,
    /// Thickness of the ring along Y.
    pub ring_depth: Real,
    /// Radial half width of the ring band.
    pub ring_band: Real,
    pub ring_fillet_radius: Real,
}

impl Default for CurtainHolder {
    fn default() -> Self {
        CurtainHolder {
            slider: Slider::default(),
            ring_radius: 5.0,
            ring_depth: 2.2,
            ring_band: 1.0,
            ring_fillet_radius: 0.5,
        }
    }
}

impl CurtainHolder {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.slider.validate()?;
        require_positive("ring_radius", self.ring_radius)?;
        require_positive("ring_depth", self.ring_depth)?;
        require_positive("ring_band", self.ring_band)?;
        require_positive("ring_fillet_radius", self.ring_fillet_radius)?;
        if self.ring_band >= self.ring_radius {
            return Err(ModelError::invalid("ring_band", "the ring band closes the ring"));
        }
        Ok(())
    }

    /// Height of the ring center above the slider top.
    fn ring_z(&self) -> Real {
        1.0 + self.slider.base_height - self.ring_radius * 1.4
    }
}

impl Part for CurtainHolder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "curtain rail slider with a rounded ring on top"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;
        let slider = self.slider.build(segments)?;

        let band = Sketch::circle(self.ring_radius + self.ring_band, segments)?
            .difference(&Sketch::circle(self.ring_radius - self.ring_band, segments)?);
        let ring = extrude_filleted(
            &band,
            self.ring_depth,
            self.ring_fillet_radius,
            EdgeSelection::TopAndBottom,
            segments,
        )?
        .translate(0.0, 0.0, -self.ring_depth * 0.5)
        .rotate_about(Axis::X, 90.0)
        .translate(0.0, 0.0, self.slider.base_height + self.ring_z());

        Ok(slider + ring)
    }
}

impl PartParams for CurtainHolder {
    const NAME: &'static str = "curtain_holder";
}
