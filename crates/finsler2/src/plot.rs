//! Diagrams of the unit ball and of a distance computation, rendered as SVG.
//!
//! A distance diagram shows the ball, its copy scaled by the distance and
//! translated to `P` (whose boundary then passes through `Q`), and markers at
//! the origin, `P` and `Q`.

use nalgebra::Vector2;

use crate::ball::Polygon;
use crate::gauge::Measurement;
use crate::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub at: Point,
    pub label: String,
    pub color: &'static str,
}

impl Marker {
    fn new(at: Point, label: &str, color: &'static str) -> Self {
        Self {
            at,
            label: label.to_string(),
            color,
        }
    }
}

/// Geometry to draw, in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub ball: Vec<Point>,
    pub scaled: Option<Vec<Point>>,
    pub markers: Vec<Marker>,
}

/// Rendering options.
#[derive(Clone, Debug)]
pub struct SvgStyle {
    /// Length of the longer image side in pixels.
    pub size_px: f64,
    /// Padding around the scene, as a fraction of its larger extent.
    pub margin: f64,
    /// Preferred grid spacing in world units (coarsened if too dense).
    pub grid_step: f64,
    pub ball_color: &'static str,
    pub scaled_color: &'static str,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            size_px: 480.0,
            margin: 0.1,
            grid_step: 0.5,
            ball_color: "red",
            scaled_color: "blue",
        }
    }
}

const MAX_GRID_LINES: f64 = 40.0;

impl Scene {
    pub fn unit_ball(poly: &Polygon) -> Self {
        Self {
            ball: poly.vertices().to_vec(),
            scaled: None,
            markers: vec![Marker::new(Vector2::zeros(), "O", "red")],
        }
    }

    /// Ball, its copy scaled by `d` and moved to `p`, and markers at O, P, Q.
    pub fn distance(poly: &Polygon, p: Point, q: Point, d: f64) -> Self {
        let scaled = (d > 0.0).then(|| poly.scaled_translated(d, p));
        Self {
            ball: poly.vertices().to_vec(),
            scaled,
            markers: vec![
                Marker::new(Vector2::zeros(), "O", "red"),
                Marker::new(p, "P", "blue"),
                Marker::new(q, "Q", "green"),
            ],
        }
    }

    pub fn from_measurement(poly: &Polygon, m: &Measurement) -> Self {
        Self::distance(poly, m.from, m.to, m.distance)
    }

    /// Axis-aligned bounds of everything in the scene.
    pub fn bounds(&self) -> (Point, Point) {
        let mut lo = Vector2::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let scaled = self.scaled.iter().flatten();
        let marks = self.markers.iter().map(|m| &m.at);
        for p in self.ball.iter().chain(scaled).chain(marks) {
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        (lo, hi)
    }

    pub fn to_svg(&self, style: &SvgStyle) -> String {
        let (mut lo, mut hi) = self.bounds();
        let extent = (hi - lo).max();
        let extent = if extent.is_finite() && extent > 0.0 {
            extent
        } else {
            1.0
        };
        let pad = Vector2::repeat(extent * style.margin.max(0.0));
        lo -= pad;
        hi += pad;
        let span = hi - lo;
        let scale = style.size_px / span.max();
        let (w, h) = (span.x * scale, span.y * scale);
        let px = |p: &Point| ((p.x - lo.x) * scale, (hi.y - p.y) * scale);

        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.1}" height="{h:.1}" viewBox="0 0 {w:.3} {h:.3}">"#
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"<rect x="0" y="0" width="{w:.3}" height="{h:.3}" fill="white"/>"#
        ));
        out.push('\n');

        let step = grid_step(style.grid_step, span.max());
        let mut gx = (lo.x / step).ceil() * step;
        while gx <= hi.x {
            let (x, _) = px(&Vector2::new(gx, 0.0));
            out.push_str(&format!(
                r#"<line x1="{x:.3}" y1="0" x2="{x:.3}" y2="{h:.3}" stroke="black" stroke-width="0.5" stroke-dasharray="1,3"/>"#
            ));
            out.push('\n');
            gx += step;
        }
        let mut gy = (lo.y / step).ceil() * step;
        while gy <= hi.y {
            let (_, y) = px(&Vector2::new(0.0, gy));
            out.push_str(&format!(
                r#"<line x1="0" y1="{y:.3}" x2="{w:.3}" y2="{y:.3}" stroke="black" stroke-width="0.5" stroke-dasharray="1,3"/>"#
            ));
            out.push('\n');
            gy += step;
        }

        out.push_str(&polygon_element(&self.ball, style.ball_color, &px));
        if let Some(scaled) = &self.scaled {
            out.push_str(&polygon_element(scaled, style.scaled_color, &px));
        }
        for m in &self.markers {
            let (x, y) = px(&m.at);
            out.push_str(&format!(
                r#"<circle cx="{x:.3}" cy="{y:.3}" r="4" fill="{}"/>"#,
                m.color
            ));
            out.push('\n');
            out.push_str(&format!(
                r#"<text x="{:.3}" y="{:.3}" font-size="12" fill="{}">{}</text>"#,
                x + 6.0,
                y - 6.0,
                m.color,
                m.label
            ));
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn polygon_element(points: &[Point], color: &str, px: &impl Fn(&Point) -> (f64, f64)) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|p| {
            let (x, y) = px(p);
            format!("{x:.3},{y:.3}")
        })
        .collect();
    format!(
        "<polygon points=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1.5\"/>\n",
        coords.join(" ")
    )
}

fn grid_step(preferred: f64, span: f64) -> f64 {
    let mut step = if preferred.is_finite() && preferred > 0.0 {
        preferred
    } else {
        1.0
    };
    while span / step > MAX_GRID_LINES {
        step *= 2.0;
    }
    step
}
