//! Angle-ordered vertex representation of the unit ball (`Polygon`).
//!
//! Purpose
//! - Hold the boundary points of the unit ball sorted by polar angle so that a
//!   ray direction can be bracketed by a circular scan.
//! - Keep construction cheap and explicit: plain construction only rejects
//!   inputs with undefined angles; convexity and origin containment are checked
//!   on request (`BuildCfg::validate`).
//!
//! Invariants
//! - At least 3 vertices, none at the origin, all finite.
//! - Sorted by `phi` ascending; equal angles by ascending radius, then input order.
//! - Never mutated after construction.

use nalgebra::Vector2;

use super::types::{BuildCfg, GaugeCfg, Intersection};
use super::util::{convex_hull, turns_consistent, winds_around_origin};
use super::solvers::ray_hits_edge;
use crate::error::{FinslerError, Result};
use crate::polar::{angle_diff, ccw_sweep, to_polar, PolarPoint};
use crate::Point;

/// Closed polygon whose vertices are ordered by polar angle around the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Point>,
    polar: Vec<PolarPoint>,
}

impl Polygon {
    /// Order `points` by angle without checking convexity.
    pub fn build(points: &[Point]) -> Result<Self> {
        Self::build_with(points, BuildCfg::default())
    }

    /// Order `points` by angle; with `cfg.validate` also require a convex
    /// polygon that strictly contains the origin.
    pub fn build_with(points: &[Point], cfg: BuildCfg) -> Result<Self> {
        if points.len() < 3 {
            return Err(FinslerError::invalid(format!(
                "need at least 3 points, got {}",
                points.len()
            )));
        }
        for p in points {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(FinslerError::invalid(format!(
                    "non-finite point ({}, {})",
                    p.x, p.y
                )));
            }
            if p.x == 0.0 && p.y == 0.0 {
                return Err(FinslerError::invalid(
                    "a boundary point lies at the origin",
                ));
            }
        }
        let mut keyed: Vec<(PolarPoint, Point)> =
            points.iter().map(|&p| (to_polar(p), p)).collect();
        // sort_by is stable: exact ties keep input order
        keyed.sort_by(|a, b| {
            a.0.phi
                .total_cmp(&b.0.phi)
                .then(a.0.rho.total_cmp(&b.0.rho))
        });
        let poly = Polygon {
            verts: keyed.iter().map(|k| k.1).collect(),
            polar: keyed.iter().map(|k| k.0).collect(),
        };
        if cfg.validate {
            poly.validate(&cfg.geom)?;
        }
        tracing::debug!(
            vertices = poly.len(),
            validated = cfg.validate,
            "polygon built"
        );
        Ok(poly)
    }

    /// Ball spanned by the convex hull of `points` (validated).
    ///
    /// Interior and collinear points are dropped, so any point cloud whose hull
    /// strictly contains the origin is accepted.
    pub fn from_hull(points: &[Point], geom: GaugeCfg) -> Result<Self> {
        let hull = convex_hull(points)
            .ok_or_else(|| FinslerError::invalid("convex hull is degenerate"))?;
        Self::build_with(
            &hull,
            BuildCfg {
                validate: true,
                geom,
            },
        )
    }

    fn validate(&self, cfg: &GaugeCfg) -> Result<()> {
        if !turns_consistent(&self.verts, cfg.eps_turn) {
            return Err(FinslerError::invalid("points are not in convex position"));
        }
        if !winds_around_origin(&self.verts, cfg.eps_turn) {
            return Err(FinslerError::invalid(
                "origin is not strictly inside the polygon",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.verts
    }

    #[inline]
    pub fn polar_vertices(&self) -> &[PolarPoint] {
        &self.polar
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Advisory convexity test (collinear turns allowed). Construction does not
    /// enforce it unless validation was requested.
    pub fn is_convex(&self) -> bool {
        turns_consistent(&self.verts, GaugeCfg::default().eps_turn)
    }

    /// Whether the origin lies strictly inside, with distinct angular slots.
    pub fn contains_origin(&self) -> bool {
        winds_around_origin(&self.verts, GaugeCfg::default().eps_turn)
    }

    /// Vertex or adjacent vertex pair whose angles bracket the direction `dir`.
    ///
    /// Exact angle matches (within `eps_angle`) return the first matching vertex.
    /// Otherwise the pair `(v_i, v_{i+1 mod n})` whose counter-clockwise gap
    /// strictly contains the ray angle is returned; the gap from the last vertex
    /// back to the first covers the wraparound through ±π.
    pub fn bracket(&self, dir: Point, cfg: &GaugeCfg) -> Result<Intersection> {
        let ray = to_polar(dir);
        let phi = ray.phi;
        if ray.rho == 0.0 || !phi.is_finite() {
            return Err(FinslerError::DegenerateRay { phi });
        }
        if let Some(i) = self
            .polar
            .iter()
            .position(|v| angle_diff(v.phi, phi).abs() <= cfg.eps_angle)
        {
            return Ok(Intersection::Vertex(self.verts[i]));
        }
        let n = self.verts.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let gap = ccw_sweep(self.polar[i].phi, self.polar[j].phi);
            let off = ccw_sweep(self.polar[i].phi, phi);
            if off > 0.0 && off < gap {
                return Ok(Intersection::Edge(self.verts[i], self.verts[j]));
            }
        }
        Err(FinslerError::DegenerateRay { phi })
    }

    /// Point where the ray from the origin along `dir` crosses the boundary.
    pub fn boundary_point(&self, dir: Point, cfg: &GaugeCfg) -> Result<Point> {
        self.boundary_hit(dir, cfg).map(|(_, p)| p)
    }

    pub(crate) fn boundary_hit(&self, dir: Point, cfg: &GaugeCfg) -> Result<(Intersection, Point)> {
        let hit = self.bracket(dir, cfg)?;
        let p = match hit {
            Intersection::Vertex(v) => v,
            Intersection::Edge(a, b) => ray_hits_edge(dir, a, b, cfg)?,
        };
        Ok((hit, p))
    }

    /// Vertices scaled by `k` about the origin, then translated by `t`.
    pub fn scaled_translated(&self, k: f64, t: Point) -> Vec<Point> {
        self.verts.iter().map(|v| v * k + t).collect()
    }

    /// Axis-aligned bounds `(min, max)` of the vertices.
    pub fn bounds(&self) -> (Point, Point) {
        let mut lo = Vector2::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &self.verts {
            lo = lo.inf(v);
            hi = hi.sup(v);
        }
        (lo, hi)
    }
}
