//! Curtain rail slider with a slanted stop on top.
//!
//! The slider is a rounded block with a groove along each side that rides
//! on the rail lips. The grooves have rounded inner corners and rounded
//! outer lips.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude_on;
use crate::fillet::assist::outer_fillet;
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::{Sketch, Workplane};
use crate::traits::CSG;
use serde::{Deserialize, Serialize};

/// Blockers shorter than this (slider included) do not stop the curtain.
const MIN_BLOCKING_HEIGHT: Real = 15.0;

/// The rail slider shared by the curtain parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slider {
    pub base_width: Real,
    pub base_length: Real,
    pub base_height: Real,
    pub base_fillet_radius: Real,
    /// Height of the groove floor above the bottom.
    pub dent_z: Real,
    pub dent_depth: Real,
    pub dent_height: Real,
    pub dent_fillet_radius: Real,
}

impl Default for Slider {
    fn default() -> Self {
        Slider {
            base_width: 12.0,
            base_length: 9.0,
            base_height: 7.0,
            base_fillet_radius: 0.2,
            dent_z: 2.2,
            dent_depth: 2.0,
            dent_height: 3.2,
            dent_fillet_radius: 0.2,
        }
    }
}

impl Slider {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("base_width", self.base_width)?;
        require_positive("base_length", self.base_length)?;
        require_positive("base_height", self.base_height)?;
        require_positive("base_fillet_radius", self.base_fillet_radius)?;
        require_positive("dent_depth", self.dent_depth)?;
        require_positive("dent_height", self.dent_height)?;
        require_positive("dent_fillet_radius", self.dent_fillet_radius)?;
        if self.dent_depth * 2.0 >= self.base_length {
            return Err(ModelError::invalid("dent_depth", "the grooves would cut the slider in half"));
        }
        let r = self.dent_fillet_radius;
        if self.dent_z < r || self.dent_z + self.dent_height + r > self.base_height {
            return Err(ModelError::invalid(
                "dent_z",
                "grooves and their rounded lips must lie within the slider height",
            ));
        }
        if r * 2.0 > self.dent_depth.min(self.dent_height) {
            return Err(ModelError::FilletTooLarge {
                radius: r,
                limit: self.dent_depth.min(self.dent_height) * 0.5,
            });
        }
        Ok(())
    }

    /// Groove cutter for the -Y side, with its outer face at `y = -dent_depth / 2`
    /// and its floor at `z = 0`.
    fn dent(&self, segments: usize) -> Result<Mesh, ModelError> {
        let (width, r) = (self.base_width, self.dent_fillet_radius);

        // Groove cross-section in YZ, rounded on the inner (+Y) side.
        let section = Sketch::rectangle(self.dent_depth, self.dent_height)?
            .translate(0.0, self.dent_height * 0.5)
            .fillet_selected_corners(r, segments, |corner| corner.x > 0.0)?;
        let groove = extrude_on(&section, &Workplane::YZ.offset(-width * 0.5), width)?;

        let outer_y = -self.dent_depth * 0.5;
        let cove = outer_fillet(width, r, segments)?;
        let upper_lip = cove.translate(0.0, outer_y, self.dent_height);
        let lower_lip = cove.scale(1.0, 1.0, -1.0).translate(0.0, outer_y, 0.0);

        Ok(groove + upper_lip + lower_lip)
    }

    pub fn build(&self, segments: usize) -> Result<Mesh, ModelError> {
        self.validate()?;
        let base = extrude_filleted(
            &Sketch::rectangle(self.base_width, self.base_length)?,
            self.base_height,
            self.base_fillet_radius,
            EdgeSelection::All,
            segments,
        )?;

        let offset = self.base_length * 0.5 - self.dent_depth * 0.5;
        let dent_left = self.dent(segments)?.translate(0.0, -offset, self.dent_z);
        let dent_right = dent_left.scale(1.0, -1.0, 1.0);

        Ok(base - dent_left - dent_right)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainBlocker {
    pub slider: Slider,
    pub blocker_height: Real,
    /// Slant of the blocker front face, in degrees.
    pub slant_degrees: Real,
}

impl Default for CurtainBlocker {
    fn default() -> Self {
        CurtainBlocker {
            slider: Slider::default(),
            blocker_height: 30.0,
            slant_degrees: 8.0,
        }
    }
}

impl CurtainBlocker {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.slider.validate()?;
        require_positive("blocker_height", self.blocker_height)?;
        if self.slider.base_height + self.blocker_height < MIN_BLOCKING_HEIGHT {
            return Err(ModelError::invalid(
                "blocker_height",
                format!(
                    "base height plus blocker height must be at least {MIN_BLOCKING_HEIGHT} to block the curtain"
                ),
            ));
        }
        if !(0.0..45.0).contains(&self.slant_degrees) {
            return Err(ModelError::invalid("slant_degrees", "slant must be between 0 and 45 degrees"));
        }
        let slant_drop = self.slider.base_width * self.slant_degrees.to_radians().tan();
        if slant_drop >= self.slider.base_length {
            return Err(ModelError::invalid("slant_degrees", "the slant cuts away the whole blocker footprint"));
        }
        Ok(())
    }

    /// Footprint of the blocker: the slider outline with the back edge cut
    /// at the slant angle, pivoting about the back right corner.
    fn profile(&self) -> Result<Sketch, ModelError> {
        let (hx, hy) = (self.slider.base_width * 0.5, self.slider.base_length * 0.5);
        let slant_drop = self.slider.base_width * self.slant_degrees.to_radians().tan();
        Sketch::polygon(&[[-hx, -hy], [hx, -hy], [hx, hy], [-hx, hy - slant_drop]])
    }

    /// Height of the blocker bottom: sunk into the slider top so the two
    /// fuse below the rounded edges.
    pub fn blocker_z(&self) -> Real {
        self.slider.base_height - 2.0 * (self.slider.base_fillet_radius + self.slider.dent_fillet_radius)
    }
}

impl Part for CurtainBlocker {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "curtain rail slider with a slanted blocker on top"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let slider = self.slider.build(quality.segments)?;
        let blocker = extrude_filleted(
            &self.profile()?,
            self.blocker_height,
            self.slider.base_fillet_radius,
            EdgeSelection::All,
            quality.segments,
        )?;
        Ok(slider + blocker.translate(0.0, 0.0, self.blocker_z()))
    }
}

impl PartParams for CurtainBlocker {
    const NAME: &'static str = "curtain_blocker";
}
