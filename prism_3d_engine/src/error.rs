//! Error types for the Prism3D engine
//!
//! The culling/LOD/batching core is infallible by construction: degenerate
//! geometry collapses into empty volumes rather than errors. The variants
//! below cover configuration validation, stale references on fallible
//! entry points, and failures surfaced by the GPU backend collaborator.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Failure reported by the GPU backend (submission, resize, ...)
    BackendError(String),

    /// Configuration rejected by validation (settings, BVH, timestep)
    InvalidConfig(String),

    /// Reference to a renderable or entity that does not exist
    InvalidResource(String),

    /// Operation called in the wrong lifecycle phase
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an `Error::InvalidState`, logging it at ERROR severity with file:line.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("prism3d::Runtime", "No active camera for frame {}", frame));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism3d::Error::InvalidState(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
