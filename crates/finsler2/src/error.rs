//! Error taxonomy for ball construction and gauge queries.
//!
//! All variants are raised where the problem is detected and propagate
//! unchanged; the computations are deterministic, so nothing is retried.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = FinslerError> = std::result::Result<T, E>;

/// Errors produced by the geometric core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinslerError {
    /// Malformed boundary point set (too few points, a point at the origin,
    /// non-finite coordinates, or failed convexity/origin validation).
    #[error("invalid polygon: {reason}")]
    InvalidPolygon { reason: String },

    /// The ray direction could not be bracketed by any vertex or edge.
    #[error("ray at angle {phi:.6} rad cannot be bracketed by the polygon boundary")]
    DegenerateRay { phi: f64 },

    /// Ray and edge lines are parallel within tolerance.
    #[error("ray is parallel to the bracketing edge (det = {det:e})")]
    SingularIntersection { det: f64 },
}

impl FinslerError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FinslerError::InvalidPolygon {
            reason: reason.into(),
        }
    }
}
