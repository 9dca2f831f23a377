//! Cartesian ↔ polar conversion and circular angle arithmetic.
//!
//! Conventions
//! - `phi ∈ (−π, π]`, computed with `atan2`; `−π` (from a negative-zero `y`)
//!   is folded onto `+π`.
//! - The origin maps to `rho = 0, phi = 0`.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use crate::Point;

/// Polar coordinates `(rho, phi)` of a planar point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarPoint {
    pub rho: f64,
    pub phi: f64,
}

impl PolarPoint {
    #[inline]
    pub fn new(rho: f64, phi: f64) -> Self {
        Self { rho, phi }
    }

    #[inline]
    pub fn to_cartesian(self) -> Point {
        to_cartesian(self)
    }
}

/// Polar form of `p`. The origin gets the conventional angle 0.
#[inline]
pub fn to_polar(p: Point) -> PolarPoint {
    let rho = p.x.hypot(p.y);
    if rho == 0.0 {
        return PolarPoint { rho: 0.0, phi: 0.0 };
    }
    let phi = p.y.atan2(p.x);
    let phi = if phi <= -PI { PI } else { phi };
    PolarPoint { rho, phi }
}

#[inline]
pub fn to_cartesian(q: PolarPoint) -> Point {
    Vector2::new(q.rho * q.phi.cos(), q.rho * q.phi.sin())
}

/// Counter-clockwise sweep from angle `from` to angle `to`, in `[0, 2π)`.
#[inline]
pub fn ccw_sweep(from: f64, to: f64) -> f64 {
    let s = (to - from).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if s >= TAU {
        0.0
    } else {
        s
    }
}

/// Signed circular difference `a − b`, in `(−π, π]`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let s = ccw_sweep(b, a);
    if s > PI {
        s - TAU
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn axis_points() {
        let e = to_polar(vector![2.0, 0.0]);
        assert_eq!(e, PolarPoint::new(2.0, 0.0));
        let n = to_polar(vector![0.0, 3.0]);
        assert!((n.rho - 3.0).abs() < 1e-15 && (n.phi - FRAC_PI_2).abs() < 1e-15);
        let w = to_polar(vector![-1.0, 0.0]);
        assert!((w.phi - PI).abs() < 1e-15);
        let s = to_polar(vector![0.0, -1.0]);
        assert!((s.phi + FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn negative_zero_y_stays_in_half_open_range() {
        let w = to_polar(vector![-1.0, -0.0]);
        assert_eq!(w.phi, PI);
    }

    #[test]
    fn origin_has_zero_angle() {
        assert_eq!(to_polar(vector![0.0, 0.0]), PolarPoint::new(0.0, 0.0));
        assert_eq!(to_polar(vector![-0.0, -0.0]), PolarPoint::new(0.0, 0.0));
        assert_eq!(to_cartesian(PolarPoint::new(0.0, 1.3)), vector![0.0, 0.0]);
    }

    #[test]
    fn sweep_and_diff_wrap() {
        assert!((ccw_sweep(3.0, -3.0) - (TAU - 6.0)).abs() < 1e-12);
        assert!((ccw_sweep(-3.0, 3.0) - 6.0).abs() < 1e-12);
        assert_eq!(ccw_sweep(1.0, 1.0), 0.0);
        assert!(ccw_sweep(0.0, -1e-18) < TAU);
        assert!((angle_diff(-3.0, 3.0) - (TAU - 6.0)).abs() < 1e-12);
        assert!(angle_diff(PI, -PI).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn round_trip(x in -1e3f64..1e3, y in -1e3f64..1e3) {
            let p = vector![x, y];
            let q = to_polar(p);
            prop_assert!(q.rho >= 0.0);
            prop_assert!(q.phi > -PI && q.phi <= PI);
            let back = q.to_cartesian();
            let tol = 1e-9 * p.norm().max(1.0);
            prop_assert!((back - p).norm() <= tol);
        }
    }
}
