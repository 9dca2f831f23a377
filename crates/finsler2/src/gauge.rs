//! Minkowski gauge of a polygonal ball and the induced Finsler distance.
//!
//! `gauge(R) = |R| / |V|`, where `V` is the point at which the ray from the
//! origin through `R` leaves the ball. `distance(P, Q) = gauge(Q − P)` is not
//! symmetric unless the ball is centrally symmetric.

use crate::ball::{GaugeCfg, Intersection, Polygon};
use crate::error::{FinslerError, Result};
use crate::polar::to_polar;
use crate::Point;

/// Boundary contact of a non-trivial query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub intersection: Intersection,
    /// Boundary point of the unit ball in direction `to − from`.
    pub point: Point,
}

/// Full result of a distance query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub from: Point,
    pub to: Point,
    pub distance: f64,
    /// `None` when `from == to`.
    pub hit: Option<Hit>,
}

#[inline]
pub fn gauge(poly: &Polygon, r: Point) -> Result<f64> {
    gauge_with(poly, r, &GaugeCfg::default())
}

/// Gauge value of `r`; zero for the zero vector.
pub fn gauge_with(poly: &Polygon, r: Point, cfg: &GaugeCfg) -> Result<f64> {
    Ok(gauge_hit(poly, r, cfg)?.0)
}

fn gauge_hit(poly: &Polygon, r: Point, cfg: &GaugeCfg) -> Result<(f64, Option<Hit>)> {
    if r.x == 0.0 && r.y == 0.0 {
        return Ok((0.0, None));
    }
    let rho_r = to_polar(r).rho;
    let (intersection, point) = poly.boundary_hit(r, cfg)?;
    let rho_v = to_polar(point).rho;
    if !rho_v.is_finite() || rho_v <= 0.0 {
        return Err(FinslerError::DegenerateRay {
            phi: to_polar(r).phi,
        });
    }
    Ok((rho_r / rho_v, Some(Hit { intersection, point })))
}

/// Distance from `p` to `q`: the gauge of `q − p`.
#[inline]
pub fn distance(poly: &Polygon, p: Point, q: Point) -> Result<f64> {
    gauge(poly, q - p)
}

#[inline]
pub fn distance_with(poly: &Polygon, p: Point, q: Point, cfg: &GaugeCfg) -> Result<f64> {
    gauge_with(poly, q - p, cfg)
}

/// Distance plus the boundary contact used to compute it.
pub fn measure(poly: &Polygon, p: Point, q: Point, cfg: &GaugeCfg) -> Result<Measurement> {
    let (distance, hit) = gauge_hit(poly, q - p, cfg)?;
    tracing::debug!(
        px = p.x,
        py = p.y,
        qx = q.x,
        qy = q.y,
        distance,
        "distance query"
    );
    Ok(Measurement {
        from: p,
        to: q,
        distance,
        hit,
    })
}
