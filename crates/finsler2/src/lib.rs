//! Polyhedral Finsler distances in the plane.
//!
//! The unit ball is a convex polygon around the origin. The distance from `P`
//! to `Q` is the factor by which the ball must be scaled so that its boundary
//! passes through `Q − P` (the Minkowski gauge). Balls that are not centrally
//! symmetric give asymmetric distances.
//!
//! Layout
//! - `polar`: cartesian ↔ polar conversion and circular angle helpers.
//! - `ball`: angle-ordered `Polygon`, validation, ray–boundary intersection,
//!   random balls.
//! - `gauge`: gauge value, distance and full measurements.
//! - `session`: line-driven interactive session state machine.
//! - `plot`: unit-ball and distance diagrams as SVG.
//! - `api`: tuple-based entry points for callers that do not use nalgebra.

pub mod api;
pub mod ball;
pub mod error;
pub mod gauge;
pub mod plot;
pub mod polar;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cartesian point (or vector) in the plane.
pub type Point = nalgebra::Vector2<f64>;

pub use api::{build_polygon, is_convex};
pub use ball::{BuildCfg, GaugeCfg, Intersection, Polygon};
pub use error::{FinslerError, Result};
pub use gauge::{distance, gauge, measure, Measurement};
pub use polar::{to_cartesian, to_polar, PolarPoint};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::ball::rand::{draw_ball_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::ball::{BuildCfg, GaugeCfg, Intersection, Polygon};
    pub use crate::error::{FinslerError, Result};
    pub use crate::gauge::{distance, distance_with, gauge, gauge_with, measure, Measurement};
    pub use crate::plot::{Scene, SvgStyle};
    pub use crate::session::{Phase, Reply, Session};
    pub use crate::Point;
}
