//! Error handling for PoleKit
//!
//! The editing core has no fallible I/O. Interaction problems (clicking on
//! nothing, commands on ids that no longer exist) are ignored rather than
//! raised; the types below cover the few places where a caller hands in a
//! value that would break an invariant.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Pole error type
///
/// Raised by pole store commands that would violate a pole invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoleError {
    /// Height must be finite and strictly positive
    #[error("Invalid pole height {height}: must be a finite value > 0")]
    InvalidHeight {
        /// The rejected height.
        height: f64,
    },

    /// Position must be finite
    #[error("Invalid pole position ({x}, {y})")]
    InvalidPosition {
        /// The rejected x coordinate.
        x: f64,
        /// The rejected y coordinate.
        y: f64,
    },
}

/// Profile error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// The catalog has no profile with this id
    #[error("Unknown profile: {id}")]
    UnknownProfile {
        /// The id that was looked up.
        id: String,
    },

    /// A dimension was given a non-positive or non-finite value
    #[error("Invalid {dimension} for profile {id}: {value}")]
    InvalidDimension {
        /// The profile id.
        id: String,
        /// The dimension name.
        dimension: String,
        /// The rejected value.
        value: f64,
    },
}

/// Input error type
///
/// Describes problems with the render surface the input coordinates are
/// relative to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// No render surface has been attached yet
    #[error("Render surface not attached")]
    SurfaceDetached,

    /// The surface size reported by the host is unusable
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurface {
        /// Reported width in pixels.
        width: f64,
        /// Reported height in pixels.
        height: f64,
    },
}

/// Main error type for PoleKit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Pole error
    #[error(transparent)]
    Pole(#[from] PoleError),

    /// Profile error
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
