//! Front cover of a case for a PIR motion sensor board with a small TFT.
//!
//! The board sits centered on the origin with the TFT towards +X and the
//! PIR dome towards -X. Extra room for the USB plug is added at -X. Side
//! walls are half height because the back cover supplies the other half.

use crate::errors::{ModelError, require_positive};
use crate::extrude::extrude;
use crate::fillet::{EdgeSelection, extrude_filleted};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::shapes::Align3;
use crate::parts::{Part, PartParams, Quality};
use crate::sketch::Sketch;
use crate::traits::{Axis, CSG};
use serde::{Deserialize, Serialize};

/// Height taken by the TFT module between the board and the padding frame.
const TFT_MODULE_HEIGHT: Real = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcPirDetectorCase {
    /// Nominal case length, only used to place the end walls.
    pub case_x_size: Real,
    /// Free space around the board.
    pub free_space_xy: Real,
    /// Inner height of the assembled case.
    pub z_space: Real,
    pub fillet_radius: Real,
    pub wall_thickness: Real,
    pub board_x_size: Real,
    pub board_y_size: Real,
    /// Height of the board holder clips above the floor.
    pub board_z_reserved: Real,
    pub tft_x_size: Real,
    pub tft_y_size: Real,
    /// Distance from the TFT to the +X board edge.
    pub tft_edge_offset: Real,
    /// Distance from the -X board edge to the PIR center.
    pub pir_center_offset: Real,
    pub pir_outer_diameter: Real,
    pub pir_inner_diameter: Real,
    /// Extra length at -X for the USB plug.
    pub cable_space: Real,
    pub usb_cable_diameter: Real,
    /// Distance between the board mounting holes.
    pub hole_x_spacing: Real,
    pub hole_y_spacing: Real,
    pub screw_depth: Real,
    pub screw_hole_diameter: Real,
    pub screw_hole_padding: Real,
}

impl Default for AcPirDetectorCase {
    fn default() -> Self {
        AcPirDetectorCase {
            case_x_size: 75.0,
            free_space_xy: 4.0,
            z_space: 15.0,
            fillet_radius: 0.5,
            wall_thickness: 2.0,
            board_x_size: 68.5,
            board_y_size: 28.0,
            board_z_reserved: 5.0,
            tft_x_size: 13.0,
            tft_y_size: 22.0,
            tft_edge_offset: 13.5,
            pir_center_offset: 13.75,
            pir_outer_diameter: 13.0,
            pir_inner_diameter: 16.0,
            cable_space: 28.0,
            usb_cable_diameter: 4.0,
            hole_x_spacing: 63.5,
            hole_y_spacing: 23.5,
            screw_depth: 5.7,
            screw_hole_diameter: 2.05,
            screw_hole_padding: 1.5,
        }
    }
}

impl AcPirDetectorCase {
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("free_space_xy", self.free_space_xy),
            ("z_space", self.z_space),
            ("fillet_radius", self.fillet_radius),
            ("wall_thickness", self.wall_thickness),
            ("board_x_size", self.board_x_size),
            ("board_y_size", self.board_y_size),
            ("board_z_reserved", self.board_z_reserved),
            ("tft_x_size", self.tft_x_size),
            ("tft_y_size", self.tft_y_size),
            ("pir_outer_diameter", self.pir_outer_diameter),
            ("pir_inner_diameter", self.pir_inner_diameter),
            ("usb_cable_diameter", self.usb_cable_diameter),
            ("screw_depth", self.screw_depth),
            ("screw_hole_diameter", self.screw_hole_diameter),
            ("screw_hole_padding", self.screw_hole_padding),
        ] {
            require_positive(name, value)?;
        }
        if self.board_z_reserved <= TFT_MODULE_HEIGHT {
            return Err(ModelError::invalid(
                "board_z_reserved",
                format!("must exceed {TFT_MODULE_HEIGHT} to leave room for the TFT padding"),
            ));
        }
        if self.hole_x_spacing >= self.board_x_size {
            return Err(ModelError::invalid("hole_x_spacing", "mounting holes lie outside the board"));
        }
        if self.hole_y_spacing >= self.board_y_size {
            return Err(ModelError::invalid("hole_y_spacing", "mounting holes lie outside the board"));
        }
        if self.screw_depth >= self.board_z_reserved + self.wall_thickness {
            return Err(ModelError::invalid("screw_depth", "screw holes would pierce the floor"));
        }
        if self.usb_cable_diameter >= self.z_space {
            return Err(ModelError::invalid("usb_cable_diameter", "cable does not fit the case height"));
        }
        Ok(())
    }

    fn case_x_outer(&self) -> Real {
        2.0 * self.wall_thickness + self.board_x_size + 2.0 * self.free_space_xy + self.cable_space
    }

    fn case_y_inner(&self) -> Real {
        self.board_y_size + 2.0 * self.free_space_xy
    }

    fn case_y_outer(&self) -> Real {
        2.0 * self.wall_thickness + self.case_y_inner()
    }

    /// X of the case center: the cable space shifts it towards -X.
    fn case_x_center(&self) -> Real {
        -self.cable_space * 0.5 + self.wall_thickness
    }

    fn tft_x(&self) -> Real {
        self.board_x_size * 0.5 - self.tft_x_size * 0.5 - self.tft_edge_offset
    }

    fn top_wall_x(&self) -> Real {
        self.case_x_size * 0.5 - self.case_x_center() * 0.5 - self.wall_thickness - self.fillet_radius * 0.5
    }

    fn bottom_wall_x(&self) -> Real {
        -self.case_x_size - self.case_x_center() - self.wall_thickness - self.fillet_radius * 0.5
    }

    fn floor(&self, segments: usize) -> Result<Mesh, ModelError> {
        extrude_filleted(
            &Sketch::rectangle(self.case_x_outer(), self.case_y_outer())?,
            self.wall_thickness,
            self.fillet_radius,
            EdgeSelection::Vertical,
            segments,
        )
    }

    /// Straight window for the dome plus a cone widening towards the board.
    fn pir_hole(&self, segments: usize) -> Result<Mesh, ModelError> {
        let x = -self.board_x_size * 0.5 + self.pir_center_offset;
        let window = Mesh::cylinder(
            self.pir_outer_diameter * 0.5,
            self.wall_thickness * 0.5,
            segments,
            Align3::BOTTOM,
        )?;
        let flare = Mesh::cone(
            self.pir_outer_diameter * 0.5,
            self.pir_inner_diameter * 0.5,
            self.wall_thickness,
            segments,
            Align3::CENTER,
        )?
        .translate(0.0, 0.0, self.wall_thickness);
        Ok((window + flare).translate(x, 0.0, 0.0))
    }

    fn tft_hole(&self, segments: usize) -> Result<Mesh, ModelError> {
        Ok(extrude_filleted(
            &Sketch::rectangle(self.tft_x_size, self.tft_y_size)?,
            self.wall_thickness,
            self.fillet_radius,
            EdgeSelection::Vertical,
            segments,
        )?
        .translate(self.tft_x(), 0.0, 0.0))
    }

    /// Frame around the TFT filling the gap between floor and screen.
    fn tft_padding(&self, segments: usize) -> Result<Mesh, ModelError> {
        let frame = extrude_filleted(
            &Sketch::rectangle(
                self.tft_x_size + 2.0 * self.wall_thickness,
                self.tft_y_size + 2.0 * self.wall_thickness,
            )?,
            self.board_z_reserved - TFT_MODULE_HEIGHT,
            self.fillet_radius * 3.0,
            EdgeSelection::Vertical,
            segments,
        )?
        .translate(self.tft_x(), 0.0, self.wall_thickness);
        Ok(frame - self.tft_hole(segments)?.translate(0.0, 0.0, self.wall_thickness))
    }

    /// Standoff with a blind screw hole, standing on the floor.
    fn holder_clip(&self, segments: usize) -> Result<Mesh, ModelError> {
        let hole_radius = self.screw_hole_diameter * 0.5;
        let clip = extrude(
            &Sketch::circle(hole_radius + self.screw_hole_padding, segments)?,
            self.board_z_reserved,
        )?
        .translate(0.0, 0.0, self.wall_thickness);
        let hole = extrude(&Sketch::circle(hole_radius, segments)?, self.screw_depth)?.translate(
            0.0,
            0.0,
            self.wall_thickness + self.board_z_reserved - self.screw_depth,
        );
        Ok(clip - hole)
    }

    fn holder_clips(&self, segments: usize) -> Result<Mesh, ModelError> {
        let clip = self.holder_clip(segments)?;
        let (dx, dy) = (self.hole_x_spacing * 0.5, self.hole_y_spacing * 0.5);
        Ok(clip.translate(-dx, -dy, 0.0)
            + clip.translate(dx, -dy, 0.0)
            + clip.translate(-dx, dy, 0.0)
            + clip.translate(dx, dy, 0.0))
    }

    /// Walls along X at both sides of the board.
    fn side_walls(&self, segments: usize) -> Result<Mesh, ModelError> {
        let wall = extrude_filleted(
            &Sketch::rectangle(self.case_x_outer(), self.wall_thickness)?,
            self.z_space * 0.5,
            self.fillet_radius,
            EdgeSelection::Vertical,
            segments,
        )?
        .translate(
            self.case_x_center(),
            self.case_y_inner() * 0.5 + self.wall_thickness * 0.5,
            self.wall_thickness,
        );
        let mirrored = wall.scale(1.0, -1.0, 1.0);
        Ok(wall + mirrored)
    }

    /// End wall across Y with only its outer vertical corners rounded.
    fn end_wall(&self, height: Real, outer_towards_plus_x: bool, segments: usize) -> Result<Mesh, ModelError> {
        let section = Sketch::rectangle(self.wall_thickness, self.case_y_outer())?.fillet_selected_corners(
            self.fillet_radius,
            segments,
            |corner| (corner.x > 0.0) == outer_towards_plus_x,
        )?;
        extrude(&section, height)
    }

    /// Full height wall at +X, half height wall with a cable notch at -X.
    fn end_walls(&self, segments: usize) -> Result<Mesh, ModelError> {
        let top = self
            .end_wall(self.z_space + self.wall_thickness, true, segments)?
            .translate(self.top_wall_x(), 0.0, self.wall_thickness);
        let bottom = self
            .end_wall(self.z_space * 0.5, false, segments)?
            .translate(self.bottom_wall_x(), 0.0, self.wall_thickness);

        let cable = extrude(&Sketch::circle(self.usb_cable_diameter * 0.5, segments)?, self.wall_thickness)?
            .rotate_about(Axis::Y, 90.0)
            .translate(
                self.bottom_wall_x() - self.wall_thickness * 0.5,
                0.0,
                self.wall_thickness + self.z_space * 0.5,
            );
        Ok(top + bottom - cable)
    }
}

impl Part for AcPirDetectorCase {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "front cover for a PIR sensor board with TFT window and board clips"
    }

    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError> {
        self.validate()?;
        let segments = quality.segments;

        let floor = self.floor(segments)?.translate(self.case_x_center(), 0.0, 0.0);
        let windows = self.pir_hole(segments)? + self.tft_hole(segments)?;

        Ok(floor - windows
            + self.holder_clips(segments)?
            + self.tft_padding(segments)?
            + self.side_walls(segments)?
            + self.end_walls(segments)?)
    }
}

impl PartParams for AcPirDetectorCase {
    const NAME: &'static str = "ac_pir_detector_case";
}
