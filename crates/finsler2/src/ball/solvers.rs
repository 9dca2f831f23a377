//! Small 2D solvers used by the ray–boundary intersector.
//!
//! - `intersect_lines`: Cramer solve of two implicit lines with a relative
//!   determinant guard.
//! - `ray_hits_edge`: where the ray from the origin along `dir` crosses the
//!   line through an edge, rejecting hits behind the origin.
use nalgebra::{Matrix2, Vector2};

use super::types::{GaugeCfg, Line2};
use crate::error::{FinslerError, Result};
use crate::polar::to_polar;
use crate::Point;

/// Unique intersection of `a` and `b`.
///
/// The determinant is compared against `eps_det · |n_a| · |n_b|`, so the guard
/// does not depend on the length of the vectors that defined the lines. The
/// norms go through `hypot` to stay finite for large normals.
pub fn intersect_lines(a: &Line2, b: &Line2, eps_det: f64) -> Result<Point> {
    let m = Matrix2::new(a.n.x, a.n.y, b.n.x, b.n.y);
    let det = m.determinant();
    let scale = a.n.x.hypot(a.n.y) * b.n.x.hypot(b.n.y);
    if !det.is_finite() || det.abs() <= eps_det * scale {
        return Err(FinslerError::SingularIntersection { det });
    }
    let x = (a.c * b.n.y - a.n.y * b.c) / det;
    let y = (a.n.x * b.c - a.c * b.n.x) / det;
    Ok(Vector2::new(x, y))
}

/// Boundary point on edge `p → q` hit by the ray from the origin along `dir`.
///
/// Only the direction of `dir` matters; the ray line is built from its unit
/// vector so that very long or very short queries solve the same system.
pub fn ray_hits_edge(dir: Point, p: Point, q: Point, cfg: &GaugeCfg) -> Result<Point> {
    let len = dir.x.hypot(dir.y);
    if !len.is_finite() || len <= 0.0 {
        return Err(FinslerError::DegenerateRay {
            phi: to_polar(dir).phi,
        });
    }
    let unit = dir / len;
    let edge = Line2::through(p, q);
    let ray = Line2::through_origin(unit);
    let hit = intersect_lines(&edge, &ray, cfg.eps_det)?;
    if hit.dot(&unit) <= 0.0 {
        // the edge line is met behind the origin: the origin is outside the polygon
        return Err(FinslerError::DegenerateRay {
            phi: to_polar(dir).phi,
        });
    }
    tracing::trace!(x = hit.x, y = hit.y, "ray hits edge");
    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn vertical_edge_and_horizontal_ray() {
        let hit = ray_hits_edge(
            vector![3.0, 0.0],
            vector![1.0, -1.0],
            vector![1.0, 1.0],
            &GaugeCfg::default(),
        )
        .unwrap();
        assert!((hit - vector![1.0, 0.0]).norm() < 1e-15);
    }

    #[test]
    fn vertical_ray_and_horizontal_edge() {
        let hit = ray_hits_edge(
            vector![0.0, 0.5],
            vector![1.0, 2.0],
            vector![-1.0, 2.0],
            &GaugeCfg::default(),
        )
        .unwrap();
        assert!((hit - vector![0.0, 2.0]).norm() < 1e-15);
    }

    #[test]
    fn slanted_edge_matches_slope_intercept_form() {
        // edge y = -x + 1, ray y = x  →  (1/2, 1/2)
        let hit = ray_hits_edge(
            vector![1.0, 1.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            &GaugeCfg::default(),
        )
        .unwrap();
        assert!((hit - vector![0.5, 0.5]).norm() < 1e-15);
    }

    #[test]
    fn parallel_lines_are_singular() {
        let e = ray_hits_edge(
            vector![1.0, 1.0],
            vector![1.0, 0.0],
            vector![2.0, 1.0],
            &GaugeCfg::default(),
        )
        .unwrap_err();
        assert!(matches!(e, FinslerError::SingularIntersection { .. }));
        let a = Line2::through(vector![0.0, 0.0], vector![1.0, 1.0]);
        let b = Line2::through(vector![0.0, 1.0], vector![1.0, 2.0 + 1e-15]);
        assert!(intersect_lines(&a, &b, 1e-12).is_err());
    }

    #[test]
    fn hit_behind_origin_is_degenerate() {
        let e = ray_hits_edge(
            vector![-1.0, 0.0],
            vector![1.0, -1.0],
            vector![1.0, 1.0],
            &GaugeCfg::default(),
        )
        .unwrap_err();
        assert!(matches!(e, FinslerError::DegenerateRay { .. }));
    }

    #[test]
    fn ray_length_does_not_matter() {
        let p = vector![1.0, 0.0];
        let q = vector![0.0, 1.0];
        let cfg = GaugeCfg::default();
        for k in [1e-300, 1e-150, 1.0, 1e154, 1e160, 1e300] {
            let hit = ray_hits_edge(vector![k, k], p, q, &cfg).unwrap();
            assert!((hit - vector![0.5, 0.5]).norm() < 1e-15, "k = {k}");
        }
        let e = ray_hits_edge(vector![f64::INFINITY, 1.0], p, q, &cfg).unwrap_err();
        assert!(matches!(e, FinslerError::DegenerateRay { .. }));
    }

    #[test]
    fn large_normals_keep_a_finite_guard() {
        let a = Line2::through_origin(vector![1e200, 1e200]);
        let b = Line2::through(vector![1.0, 0.0], vector![0.0, 1.0]);
        let x = intersect_lines(&a, &b, 1e-12).unwrap();
        assert!((x - vector![0.5, 0.5]).norm() < 1e-12);
    }

    #[test]
    fn solved_point_lies_on_both_lines() {
        let a = Line2::through(vector![0.3, -2.0], vector![1.7, 4.0]);
        let b = Line2::through_origin(vector![2.0, 0.7]);
        let x = intersect_lines(&a, &b, 1e-12).unwrap();
        assert!(a.contains_eps(x, 1e-12));
        assert!(b.contains_eps(x, 1e-12));
    }
}
