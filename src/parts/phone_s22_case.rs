//! Bumper case for a Samsung Galaxy S22.
//!
//! The phone lies screen up in a rounded shell. A lip around the screen
//! opening holds it in; the lip is bevelled by a lofted cut so the screen
//! edge stays reachable. Port, button and camera openings are cut last.

use crate::errors::{ModelError, require_positive};
use crate::extrude::{extrude, loft};
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::shapes::Align3;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::CSG;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneS22Case {
    pub phone_height: Real,
    /// Width without the volume buttons.
    pub phone_width: Real,
    /// Depth without the camera bump.
    pub phone_depth: Real,
    pub wall_thickness: Real,
    pub corner_radius: Real,
    /// Rounding of the shell and cavity cap edges.
    pub comfort_fillet: Real,
    /// How far the lip reaches over the screen.
    pub lip_height: Real,
    pub clearance: Real,
    pub charging_width: Real,
    pub charging_depth: Real,
    pub volume_length: Real,
    /// Distance of the volume rocker center from the case center.
    pub volume_offset: Real,
    pub power_length: Real,
    pub power_offset: Real,
    /// Height of the button openings.
    pub button_depth: Real,
    pub camera_width: Real,
    pub camera_height: Real,
    pub camera_corner_radius: Real,
    /// Center of the camera opening seen from the back.
    pub camera_x: Real,
    pub camera_y: Real,
    pub lip_incline_depth: Real,
    pub lip_incline_width: Real,
}

impl Default for PhoneS22Case {
    fn default() -> Self {
        PhoneS22Case {
            phone_height: 146.2,
            phone_width: 70.6,
            phone_depth: 7.5,
            wall_thickness: 1.6,
            corner_radius: 5.0,
            comfort_fillet: 1.0,
            lip_height: 0.6,
            clearance: 0.2,
            charging_width: 14.0,
            charging_depth: 8.0,
            volume_length: 25.0,
            volume_offset: 15.0,
            power_length: 12.0,
            power_offset: 10.0,
            button_depth: 5.0,
            camera_width: 40.0,
            camera_height: 35.0,
            camera_corner_radius: 3.0,
            camera_x: -15.0,
            camera_y: 45.0,
            lip_incline_depth: 1.0,
            lip_incline_width: 1.5,
        }
    }
}

/// Extra length that lets a cutter pass fully through a wall.
const THROUGH: Real = 2.0;

impl PhoneS22Case {
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("phone_height", self.phone_height),
            ("phone_width", self.phone_width),
            ("phone_depth", self.phone_depth),
            ("wall_thickness", self.wall_thickness),
            ("corner_radius", self.corner_radius),
            ("comfort_fillet", self.comfort_fillet),
            ("lip_height", self.lip_height),
            ("clearance", self.clearance),
            ("charging_width", self.charging_width),
            ("charging_depth", self.charging_depth),
            ("volume_length", self.volume_length),
            ("power_length", self.power_length),
            ("button_depth", self.button_depth),
            ("camera_width", self.camera_width),
            ("camera_height", self.camera_height),
            ("camera_corner_radius", self.camera_corner_radius),
            ("lip_incline_depth", self.lip_incline_depth),
            ("lip_incline_width", self.lip_incline_width),
        ] {
            require_positive(name, value)?;
        }
        if self.corner_radius <= self.wall_thickness {
            return Err(ModelError::invalid(
                "corner_radius",
                format!("must exceed the wall thickness {} so the cavity stays rounded", self.wall_thickness),
            ));
        }
        if self.lip_height >= self.corner_radius {
            return Err(ModelError::invalid("lip_height", "lip is wider than the corner radius"));
        }
        if self.button_depth >= self.case_depth() {
            return Err(ModelError::invalid("button_depth", "button openings are taller than the case"));
        }
        Ok(())
    }

    fn case_height(&self) -> Real {
        self.phone_height + 2.0 * self.wall_thickness
    }

    fn case_width(&self) -> Real {
        self.phone_width + 2.0 * self.wall_thickness
    }

    fn case_depth(&self) -> Real {
        self.phone_depth + 2.0 * self.wall_thickness
    }

    fn shell(&self, segments: usize) -> Result<Mesh, ModelError> {
        let outline = Sketch::rounded_rectangle(self.case_width(), self.case_height(), self.corner_radius, segments)?;
        extrude_filleted(
            &outline,
            self.case_depth(),
            self.comfort_fillet,
            EdgeSelection::TopAndBottom,
            segments,
        )
    }

    fn cavity(&self, segments: usize) -> Result<Mesh, ModelError> {
        let outline = Sketch::rounded_rectangle(
            self.phone_width + self.clearance,
            self.phone_height + self.clearance,
            self.corner_radius - self.wall_thickness,
            segments,
        )?;
        Ok(extrude_filleted(
            &outline,
            self.phone_depth + self.clearance,
            self.comfort_fillet,
            EdgeSelection::TopAndBottom,
            segments,
        )?
        .translate(0.0, 0.0, self.wall_thickness))
    }

    /// Outline of the screen opening, `grow` wider on every side.
    fn screen_outline(&self, grow: Real, segments: usize) -> Result<Sketch, ModelError> {
        Sketch::rounded_rectangle(
            self.phone_width - 2.0 * self.lip_height + 2.0 * grow,
            self.phone_height - 2.0 * self.lip_height + 2.0 * grow,
            self.corner_radius - self.lip_height,
            segments,
        )
    }

    fn screen_cutout(&self, segments: usize) -> Result<Mesh, ModelError> {
        Ok(
            extrude(&self.screen_outline(0.0, segments)?, self.wall_thickness + self.clearance)?
                .translate(0.0, 0.0, self.phone_depth + self.wall_thickness),
        )
    }

    /// Bevel widening the screen opening towards the front face.
    fn lip_incline(&self, segments: usize) -> Result<Mesh, ModelError> {
        let inner = self.screen_outline(0.0, segments)?;
        let outer = self.screen_outline(self.lip_incline_width, segments)?;
        Ok(loft(&inner, &outer, self.lip_incline_depth)?.translate(0.0, 0.0, self.case_depth() - 0.5))
    }

    fn port_cutouts(&self, segments: usize) -> Result<Mesh, ModelError> {
        let through = self.wall_thickness + THROUGH;
        let mid_z = self.case_depth() * 0.5;
        let side_x = self.case_width() * 0.5 - self.wall_thickness * 0.5;

        let charging = Mesh::cuboid(self.charging_width, self.charging_depth, through, Align3::BOTTOM)?.translate(
            0.0,
            -self.case_height() * 0.5 + self.wall_thickness * 0.5,
            mid_z,
        );
        let volume = Mesh::cuboid(through, self.volume_length, self.button_depth, Align3::CENTER)?.translate(
            -side_x,
            self.volume_offset,
            mid_z,
        );
        let power = Mesh::cuboid(through, self.power_length, self.button_depth, Align3::CENTER)?.translate(
            side_x,
            self.power_offset,
            mid_z,
        );
        let camera = extrude(
            &Sketch::rounded_rectangle(
                self.camera_width,
                self.camera_height,
                self.camera_corner_radius,
                segments,
            )?,
            through,
        )?
        .translate(self.camera_x, self.camera_y, -1.0);

        Ok(Mesh::compound([charging, volume, power, camera]))
    }
}

impl Part for PhoneS22Case {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Samsung S22 case with screen lip and port, button and camera openings"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;

        let mut case = self.shell(segments)?;
        case -= &self.cavity(segments)?;
        case -= &self.screen_cutout(segments)?;
        case -= &self.port_cutouts(segments)?;
        case -= &self.lip_incline(segments)?;
        Ok(case)
    }
}

impl PartParams for PhoneS22Case {
    const NAME: &'static str = "phone_s22_case";
}
