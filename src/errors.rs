//! Modelling errors

use crate::config::ConfigError;
use crate::float_types::Real;
use crate::io::IoError;

/// Everything that can go wrong while turning parameters into a solid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A part or primitive parameter is out of its usable range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// A 2D profile has no area, too few points, or collapsed rings
    #[error("degenerate profile: {0}")]
    DegenerateProfile(String),
    /// The two profiles of a loft cannot be paired up
    #[error("loft profiles do not match: {0}")]
    LoftMismatch(String),
    /// A fillet radius does not fit the edge it should round
    #[error("fillet radius {radius} exceeds the limit {limit} of the selected edges")]
    FilletTooLarge { radius: Real, limit: Real },
    /// A boolean sequence removed all material
    #[error("operation produced an empty solid: {0}")]
    EmptyResult(String),
    /// A part needs an external input that was not provided
    #[error("missing input: {0}")]
    MissingInput(String),
    /// Loading an input mesh failed
    #[error("could not load input mesh: {0}")]
    Input(String),
}

impl ModelError {
    /// Shorthand for [`ModelError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Top level error of the crate, joining modelling, export and configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Returns an error if `value` is not a finite, strictly positive number.
pub fn require_positive(name: &'static str, value: Real) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::invalid(name, format!("must be positive, got {value}")))
    }
}
