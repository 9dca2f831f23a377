use nalgebra::Vector2;

use crate::Point;

/// Andrew’s monotone chain convex hull (returns hull in CCW order, collinear points dropped).
pub(crate) fn convex_hull(points: &[Point]) -> Option<Vec<Point>> {
    if points.len() < 3 {
        return None;
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return None;
    }
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    if hull.len() < 3 {
        return None;
    }
    Some(hull)
}

/// Cross product of the edge vectors `b − a` and `c − b` (positive for a left turn).
#[inline]
pub(crate) fn turn(a: Point, b: Point, c: Point) -> f64 {
    cross(b - a, c - b)
}

#[inline]
pub(crate) fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// True iff every non-collinear turn of the closed sequence has the same sign.
///
/// A turn counts as collinear when `|u × v| <= eps · |u| · |v|`, which also
/// covers repeated points (zero-length edges).
pub(crate) fn turns_consistent(verts: &[Point], eps: f64) -> bool {
    let n = verts.len();
    let mut sign = 0i8;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let c = verts[(i + 2) % n];
        let (u, v) = (b - a, c - b);
        let k = cross(u, v);
        if k.abs() <= eps * u.norm() * v.norm() {
            continue;
        }
        let s = if k > 0.0 { 1 } else { -1 };
        if sign == 0 {
            sign = s;
        } else if sign != s {
            return false;
        }
    }
    true
}

/// True iff each consecutive pair (wrapping) turns strictly counter-clockwise
/// around the origin, i.e. `v_i × v_{i+1} > 0` beyond tolerance.
///
/// For an angle-sorted sequence this holds exactly when the origin lies strictly
/// inside the polygon and no two vertices share an angular slot.
pub(crate) fn winds_around_origin(verts: &[Point], eps: f64) -> bool {
    let n = verts.len();
    (0..n).all(|i| {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        cross(a, b) > eps * a.norm() * b.norm()
    })
}
