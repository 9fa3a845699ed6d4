//! Holder for two AA cells in series, standing upright.
//!
//! The case is a rounded block. Each cell slot opens towards the +Y face
//! through a channel as wide as the cell, and its `+` nub has a narrower
//! channel of its own. Two slots take the connection clips, and the
//! polarity marks are engraved into the +Y face.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude;
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::symbols;
use crate::traits::{Axis, CSG};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AaBatteryHolder {
    /// Play added to every cell dimension (subtracted from the nub height).
    pub clearance: Real,
    pub battery_diameter: Real,
    pub battery_length: Real,
    pub knob_diameter: Real,
    pub knob_height: Real,
    pub case_x_size: Real,
    pub case_y_size: Real,
    pub case_z_size: Real,
    pub case_fillet: Real,
    pub clip_x_size: Real,
    pub clip_y_size: Real,
    pub clip_z_size: Real,
    /// Glyph size and stroke width of the polarity marks.
    pub symbol_size: Real,
    pub symbol_stroke: Real,
    pub engrave_depth: Real,
}

impl Default for AaBatteryHolder {
    fn default() -> Self {
        AaBatteryHolder {
            clearance: 0.5,
            battery_diameter: 14.5,
            battery_length: 49.0,
            knob_diameter: 5.5,
            knob_height: 1.5,
            case_x_size: 30.0,
            case_y_size: 15.0,
            case_z_size: 130.0,
            case_fillet: 2.0,
            clip_x_size: 22.22,
            clip_y_size: 10.0,
            clip_z_size: 3.5,
            symbol_size: 7.0,
            symbol_stroke: 1.4,
            engrave_depth: 1.0,
        }
    }
}

/// Case placement and cut-out positions, measured from the slot origin.
const CASE_Z: Real = -4.0;
const SLOT_Y: Real = 5.0;
const SLOT_Z: Real = 10.0;
const CLIP_TOP_Z: Real = 110.5;
const CLIP_BOTTOM_Z: Real = 6.5;
const PLUS_Z: Real = 120.0;
const MINUS_Z: Real = 3.0;

impl AaBatteryHolder {
    fn slot_diameter(&self) -> Real {
        self.battery_diameter + self.clearance
    }

    fn slot_length(&self) -> Real {
        self.battery_length + self.clearance
    }

    fn nub_diameter(&self) -> Real {
        self.knob_diameter + self.clearance
    }

    fn nub_height(&self) -> Real {
        self.knob_height - self.clearance
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_positive("battery_diameter", self.battery_diameter)?;
        require_positive("battery_length", self.battery_length)?;
        require_positive("knob_diameter", self.knob_diameter)?;
        require_positive("case_x_size", self.case_x_size)?;
        require_positive("case_y_size", self.case_y_size)?;
        require_positive("case_z_size", self.case_z_size)?;
        require_positive("case_fillet", self.case_fillet)?;
        require_positive("clip_x_size", self.clip_x_size)?;
        require_positive("clip_y_size", self.clip_y_size)?;
        require_positive("clip_z_size", self.clip_z_size)?;
        require_positive("engrave_depth", self.engrave_depth)?;
        if !(self.clearance >= 0.0) {
            return Err(ModelError::invalid("clearance", "must not be negative"));
        }
        if self.nub_height() <= 0.0 {
            return Err(ModelError::invalid(
                "knob_height",
                format!("knob height {} is used up by the clearance {}", self.knob_height, self.clearance),
            ));
        }
        if self.slot_diameter() >= self.case_x_size {
            return Err(ModelError::invalid("battery_diameter", "cells do not fit the case width"));
        }
        let stack = SLOT_Z + 2.0 * (self.slot_length() + self.nub_height());
        if stack >= self.case_z_size + CASE_Z {
            return Err(ModelError::invalid("battery_length", "two cells do not fit the case height"));
        }
        Ok(())
    }

    /// One cell with its nub and the channels leading to the +Y face,
    /// standing on the XY plane at the origin.
    fn battery_slot(&self, segments: usize) -> Result<Mesh, ModelError> {
        let (length, nub_height) = (self.slot_length(), self.nub_height());
        let reach = self.case_z_size;

        let body = extrude(&Sketch::circle(self.slot_diameter() * 0.5, segments)?, length)?;
        let nub = extrude(&Sketch::circle(self.nub_diameter() * 0.5, segments)?, nub_height)?
            .translate(0.0, 0.0, length);
        let nub_channel = extrude(
            &Sketch::rectangle(self.nub_diameter(), reach)?.translate(0.0, reach * 0.5),
            nub_height,
        )?
        .translate(0.0, 0.0, length);
        let body_channel = extrude(
            &Sketch::rectangle(self.slot_diameter(), reach)?.translate(0.0, reach * 0.5),
            length,
        )?;

        Ok(body + nub + nub_channel + body_channel)
    }

    fn battery_cutout(&self, segments: usize) -> Result<Mesh, ModelError> {
        let slot = self.battery_slot(segments)?;
        let second = slot.translate(0.0, 0.0, self.slot_length() + self.nub_height());
        Ok(slot + second)
    }

    fn clip_hole(&self) -> Result<Mesh, ModelError> {
        extrude(&Sketch::rectangle(self.clip_x_size, self.clip_y_size)?, self.clip_z_size)
    }

    /// Engraving solid for `glyph`, cut from the +Y face inwards.
    fn engraving(&self, glyph: &Sketch, z: Real) -> Result<Mesh, ModelError> {
        Ok(extrude(glyph, self.engrave_depth)?
            .rotate_about(Axis::X, 90.0)
            .translate(0.0, self.case_y_size * 0.5, z))
    }
}

impl Part for AaBatteryHolder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "case for two stacked AA cells with clip slots and polarity marks"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;

        let case = extrude_filleted(
            &Sketch::rectangle(self.case_x_size, self.case_y_size)?,
            self.case_z_size,
            self.case_fillet,
            EdgeSelection::All,
            segments,
        )?
        .translate(0.0, 0.0, CASE_Z);

        let plus = symbols::plus(self.symbol_size, self.symbol_stroke)?;
        let minus = symbols::minus(self.symbol_size, self.symbol_stroke)?;

        let mut holder = case;
        holder -= &self.battery_cutout(segments)?.translate(0.0, SLOT_Y, SLOT_Z);
        holder -= &self.clip_hole()?.translate(0.0, SLOT_Y, CLIP_TOP_Z);
        holder -= &self.clip_hole()?.translate(0.0, SLOT_Y, CLIP_BOTTOM_Z);
        holder -= &self.engraving(&plus, PLUS_Z)?;
        holder -= &self.engraving(&minus, MINUS_Z)?;
        Ok(holder)
    }
}

impl PartParams for AaBatteryHolder {
    const NAME: &'static str = "aa_battery_holder";
}
