//! Basic value types shared by the polygon builder and the intersector.
//!
//! - `GaugeCfg`: centralizes epsilons for angle matching, line solves and turn tests.
//! - `BuildCfg`: polygon construction options (validation on/off).
//! - `Line2`: implicit line `n·x = c`, the form used by the 2×2 solve.
//! - `Intersection`: vertex or bracketing edge hit by a ray.

use nalgebra::Vector2;

use crate::Point;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeCfg {
    /// Two angles closer than this (circularly) count as equal.
    pub eps_angle: f64,
    /// Relative determinant threshold below which ray and edge count as parallel.
    pub eps_det: f64,
    /// Relative cross-product threshold below which a turn counts as collinear.
    pub eps_turn: f64,
}

impl Default for GaugeCfg {
    fn default() -> Self {
        Self {
            eps_angle: 1e-12,
            eps_det: 1e-12,
            eps_turn: 1e-12,
        }
    }
}

/// Polygon construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildCfg {
    /// Reject input that is not convex or does not strictly contain the origin.
    pub validate: bool,
    pub geom: GaugeCfg,
}

impl BuildCfg {
    #[inline]
    pub fn validated() -> Self {
        Self {
            validate: true,
            geom: GaugeCfg::default(),
        }
    }
}

/// Line `n · x = c` (normal need not be unit length).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Line2 {
    /// Line through `p` and `q`. Vertical lines (`p.x == q.x`) are ordinary here:
    /// their normal is horizontal.
    #[inline]
    pub fn through(p: Point, q: Point) -> Self {
        let d = q - p;
        let n = Vector2::new(d.y, -d.x);
        Self { n, c: n.dot(&p) }
    }

    /// Line through the origin with direction `dir`.
    #[inline]
    pub fn through_origin(dir: Point) -> Self {
        Self {
            n: Vector2::new(dir.y, -dir.x),
            c: 0.0,
        }
    }

    #[inline]
    pub fn contains_eps(&self, p: Point, eps: f64) -> bool {
        (self.n.dot(&p) - self.c).abs() <= eps * self.n.norm().max(1.0)
    }
}

/// Where a ray from the origin leaves the polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    /// The ray passes exactly through this vertex.
    Vertex(Point),
    /// The ray crosses the interior of the edge between these adjacent vertices
    /// (counter-clockwise order).
    Edge(Point, Point),
}
