//! Parametric, 3D-printable parts on a small **Constructive Solid Geometry (CSG)** kernel.
//!
//! Solids are polygon meshes combined with Boolean operations (*union*,
//! *difference*, *intersection*) on [BSP](mesh::bsp) trees. 2D profiles are
//! [`Sketch`](sketch::Sketch)es backed by `geo`, turned into solids by
//! [extrusion](extrude), lofting and [filleted extrusion](fillet).
//!
//! Every part in [`parts`] reads its measured dimensions from a parameter
//! struct, runs a fixed sequence of kernel calls and is exported to STEP,
//! STL and 3MF by [`io::export_model`].
//!
//! ```
//! use printparts::parts::{Part, Quality, gear_slotter::GearSlotter};
//! let tube = GearSlotter::default().build(&Quality { segments: 24 }).unwrap();
//! assert!(tube.volume() > 0.0);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod config;
pub mod errors;
pub mod extrude;
pub mod fillet;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod parts;
pub mod screws;
pub mod sketch;
pub mod symbols;
pub mod traits;
pub mod triangulated;

pub use errors::{Error, ModelError};
pub use mesh::Mesh;
pub use sketch::Sketch;
pub use traits::CSG;
