//! Writing finished parts to disk (STEP, STL, 3MF) and reading meshes back.

use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub mod step;
pub mod stl;
pub mod threemf;

pub use step::save_step;
pub use stl::{load_stl, save_stl};
pub use threemf::{load_3mf, save_3mf};

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Unknown export format or file extension.
    #[error("unknown file format: {extension}")]
    UnknownFormat { extension: String },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing the 3MF container failed.
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The 3MF model document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}

/// Open a file for reading, reporting a missing file as [`IoError::FileNotFound`].
pub(crate) fn open_input(path: &Path) -> IoResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}

/// File formats a part can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Step,
    Stl,
    StlAscii,
    ThreeMf,
}

impl ExportFormat {
    /// The formats written when nothing else is configured.
    pub const DEFAULTS: [ExportFormat; 3] = [ExportFormat::Step, ExportFormat::Stl, ExportFormat::ThreeMf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Step => "step",
            ExportFormat::Stl | ExportFormat::StlAscii => "stl",
            ExportFormat::ThreeMf => "3mf",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExportFormat::Step => "STEP",
            ExportFormat::Stl => "STL",
            ExportFormat::StlAscii => "ASCII STL",
            ExportFormat::ThreeMf => "3MF",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "step" | "stp" => Ok(ExportFormat::Step),
            "stl" => Ok(ExportFormat::Stl),
            "stl-ascii" => Ok(ExportFormat::StlAscii),
            "3mf" => Ok(ExportFormat::ThreeMf),
            _ => Err(IoError::UnknownFormat {
                extension: s.to_string(),
            }),
        }
    }
}

/// Write `mesh` as `{name}.{ext}` into `dir` for every format in `formats`,
/// creating `dir` if needed. Returns the written paths in format order.
pub fn export_model(mesh: &Mesh, name: &str, dir: &Path, formats: &[ExportFormat]) -> IoResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(formats.len());
    for &format in formats {
        let path = dir.join(format!("{name}.{}", format.extension()));
        match format {
            ExportFormat::Step => save_step(mesh, name, &path)?,
            ExportFormat::Stl => save_stl(mesh, name, &path, false)?,
            ExportFormat::StlAscii => save_stl(mesh, name, &path, true)?,
            ExportFormat::ThreeMf => save_3mf(mesh, name, &path)?,
        }
        info!(path = %path.display(), triangles = mesh.triangle_count(), "exported {}", format.label());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names() {
        assert_eq!("STEP".parse::<ExportFormat>().unwrap(), ExportFormat::Step);
        assert_eq!("stl-ascii".parse::<ExportFormat>().unwrap(), ExportFormat::StlAscii);
        assert!(matches!(
            "obj".parse::<ExportFormat>(),
            Err(IoError::UnknownFormat { .. })
        ));
    }
}
