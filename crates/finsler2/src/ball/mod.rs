//! Polygonal unit balls: construction, ordering and ray–boundary intersection.
//!
//! Purpose
//! - `Polygon` keeps the ball's boundary points sorted by polar angle, which
//!   turns "where does this ray leave the ball" into a circular bracket lookup
//!   followed by one 2×2 line solve.
//! - Tolerances live in `GaugeCfg`; construction options in `BuildCfg`.
//!
//! Code cross-refs: `Polygon`, `Intersection`, `Line2`, `crate::gauge`

pub mod ordered;
pub mod rand;
mod solvers;
mod types;
mod util;

pub use ordered::Polygon;
pub use solvers::{intersect_lines, ray_hits_edge};
pub use types::{BuildCfg, GaugeCfg, Intersection, Line2};
