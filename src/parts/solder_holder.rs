//! Stand for a solder wire spool.
//!
//! A weighted base plate carries an upright trapezoid plate; the spool
//! bar sticks out of that plate horizontally and ends in a cover disc
//! that keeps the spool on.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude;
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::{Axis, CSG};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolderHolder {
    pub base_x_size: Real,
    pub base_y_size: Real,
    pub base_z_size: Real,
    pub base_corner_radius: Real,
    pub base_edge_radius: Real,
    /// Pocket under the base for a weight.
    pub weight_gap_x_size: Real,
    pub weight_gap_y_size: Real,
    pub weight_gap_z_size: Real,
    pub weight_gap_fillet: Real,
    /// Puck left standing in the pocket to center the weight.
    pub weight_hole_diameter: Real,
    pub shaft_x_size_top: Real,
    pub shaft_x_size_bottom: Real,
    pub shaft_y_size: Real,
    pub shaft_depth: Real,
    pub shaft_fillet: Real,
    pub bar_diameter: Real,
    pub bar_length: Real,
    /// Gap between the bar and the top of the shaft plate.
    pub bar_offset_from_top: Real,
    pub cover_diameter: Real,
    pub cover_thickness: Real,
    pub cover_fillet: Real,
    /// Where the holder is placed on the base.
    pub holder_y: Real,
    pub holder_z: Real,
}

impl Default for SolderHolder {
    fn default() -> Self {
        SolderHolder {
            base_x_size: 80.0,
            base_y_size: 65.0,
            base_z_size: 6.0,
            base_corner_radius: 3.0,
            base_edge_radius: 1.0,
            weight_gap_x_size: 70.0,
            weight_gap_y_size: 55.0,
            weight_gap_z_size: 3.0,
            weight_gap_fillet: 1.0,
            weight_hole_diameter: 23.0,
            shaft_x_size_top: 20.0,
            shaft_x_size_bottom: 30.0,
            shaft_y_size: 63.0,
            shaft_depth: 3.2,
            shaft_fillet: 1.5,
            bar_diameter: 15.0,
            bar_length: 60.0,
            bar_offset_from_top: 5.0,
            cover_diameter: 18.0,
            cover_thickness: 3.0,
            cover_fillet: 0.5,
            holder_y: 32.5,
            holder_z: 35.0,
        }
    }
}

impl SolderHolder {
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("base_x_size", self.base_x_size),
            ("base_y_size", self.base_y_size),
            ("base_z_size", self.base_z_size),
            ("base_corner_radius", self.base_corner_radius),
            ("base_edge_radius", self.base_edge_radius),
            ("weight_gap_x_size", self.weight_gap_x_size),
            ("weight_gap_y_size", self.weight_gap_y_size),
            ("weight_gap_z_size", self.weight_gap_z_size),
            ("weight_gap_fillet", self.weight_gap_fillet),
            ("weight_hole_diameter", self.weight_hole_diameter),
            ("shaft_x_size_top", self.shaft_x_size_top),
            ("shaft_x_size_bottom", self.shaft_x_size_bottom),
            ("shaft_y_size", self.shaft_y_size),
            ("shaft_depth", self.shaft_depth),
            ("shaft_fillet", self.shaft_fillet),
            ("bar_diameter", self.bar_diameter),
            ("bar_length", self.bar_length),
            ("cover_diameter", self.cover_diameter),
            ("cover_thickness", self.cover_thickness),
            ("cover_fillet", self.cover_fillet),
        ] {
            require_positive(name, value)?;
        }
        if self.weight_gap_x_size >= self.base_x_size || self.weight_gap_y_size >= self.base_y_size {
            return Err(ModelError::invalid("weight_gap_x_size", "weight pocket is larger than the base"));
        }
        if self.weight_gap_z_size >= self.base_z_size {
            return Err(ModelError::invalid("weight_gap_z_size", "weight pocket cuts through the base"));
        }
        if self.weight_hole_diameter >= self.weight_gap_x_size.min(self.weight_gap_y_size) {
            return Err(ModelError::invalid("weight_hole_diameter", "puck does not fit the weight pocket"));
        }
        if self.bar_length <= self.shaft_depth + self.cover_thickness {
            return Err(ModelError::invalid("bar_length", "bar is shorter than the plate and cover"));
        }
        if self.bar_diameter + self.bar_offset_from_top > self.shaft_y_size {
            return Err(ModelError::invalid("bar_diameter", "bar does not fit on the shaft plate"));
        }
        Ok(())
    }

    /// Base plate with the weight pocket underneath and the centering puck.
    fn base(&self, segments: usize) -> Result<Mesh, ModelError> {
        let plate = extrude_filleted(
            &Sketch::rounded_rectangle(self.base_x_size, self.base_y_size, self.base_corner_radius, segments)?,
            self.base_z_size,
            self.base_edge_radius,
            EdgeSelection::TopAndBottom,
            segments,
        )?;
        let pocket = extrude_filleted(
            &Sketch::rectangle(self.weight_gap_x_size, self.weight_gap_y_size)?,
            self.weight_gap_z_size,
            self.weight_gap_fillet,
            EdgeSelection::Vertical,
            segments,
        )?;
        let puck = extrude(
            &Sketch::circle(self.weight_hole_diameter * 0.5, segments)?,
            self.weight_gap_z_size,
        )?;
        Ok(plate - pocket + puck)
    }

    /// Shaft plate lying on the XY plane with the bar and cover standing on it.
    fn holder(&self, segments: usize) -> Result<Mesh, ModelError> {
        let half_y = self.shaft_y_size * 0.5;
        let inset = (self.shaft_x_size_bottom - self.shaft_x_size_top) * 0.5;
        let trapezoid = Sketch::polygon(&[
            [0.0, -half_y],
            [self.shaft_x_size_bottom, -half_y],
            [self.shaft_x_size_top + inset, half_y],
            [inset, half_y],
        ])?
        .centered();
        let shaft = extrude_filleted(
            &trapezoid,
            self.shaft_depth,
            self.shaft_fillet,
            EdgeSelection::All,
            segments,
        )?;

        let bar_y = half_y - self.bar_diameter * 0.5 - self.bar_offset_from_top;
        let bar = extrude(
            &Sketch::circle(self.bar_diameter * 0.5, segments)?,
            self.bar_length - self.shaft_depth,
        )?
        .translate(0.0, bar_y, self.shaft_depth);
        let cover = extrude_filleted(
            &Sketch::circle(self.cover_diameter * 0.5, segments)?,
            self.cover_thickness,
            self.cover_fillet,
            EdgeSelection::Top,
            segments,
        )?
        .translate(0.0, bar_y, self.bar_length - self.cover_thickness);

        Ok(shaft + bar + cover)
    }
}

impl Part for SolderHolder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "weighted stand with a horizontal bar for a solder spool"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;
        let holder = self
            .holder(segments)?
            .rotate_about(Axis::X, 90.0)
            .translate(0.0, self.holder_y, self.holder_z);
        Ok(self.base(segments)? + holder)
    }
}

impl PartParams for SolderHolder {
    const NAME: &'static str = "solder_holder";
}
