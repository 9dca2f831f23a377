//! Tuple-based entry points.
//!
//! Thin wrappers over `Polygon` and `gauge` for callers that hold plain
//! `(x, y)` pairs.

use crate::ball::Polygon;
use crate::error::Result;
use crate::Point;

#[inline]
fn pt((x, y): (f64, f64)) -> Point {
    Point::new(x, y)
}

/// Angle-ordered ball from raw boundary points (no convexity check).
pub fn build_polygon(points: &[(f64, f64)]) -> Result<Polygon> {
    let pts: Vec<Point> = points.iter().copied().map(pt).collect();
    Polygon::build(&pts)
}

/// Distance from `p` to `q` under the ball's gauge.
pub fn distance(poly: &Polygon, p: (f64, f64), q: (f64, f64)) -> Result<f64> {
    crate::gauge::distance(poly, pt(p), pt(q))
}

/// Advisory convexity check.
#[inline]
pub fn is_convex(poly: &Polygon) -> bool {
    poly.is_convex()
}
