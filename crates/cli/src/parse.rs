use anyhow::{bail, Context, Result};
use finsler2::Point;

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

fn coordinates(s: &str) -> Result<Vec<f64>> {
    s.split(is_separator)
        .filter(|t| !t.is_empty())
        .map(|t| {
            let v: f64 = t
                .parse()
                .with_context(|| format!("bad coordinate {t:?} in {s:?}"))?;
            if !v.is_finite() {
                bail!("coordinate {t:?} in {s:?} is not finite");
            }
            Ok(v)
        })
        .collect()
}

/// Parse `"x,y"` (or `"x y"`) into a point.
pub fn point(s: &str) -> Result<Point> {
    let coords = coordinates(s)?;
    let [x, y] = coords.as_slice() else {
        bail!("expected a point `x,y`, got {s:?}");
    };
    Ok(Point::new(*x, *y))
}

/// Parse a ball given as a flat coordinate list, read in pairs.
///
/// Commas, semicolons and whitespace all separate coordinates, so
/// `"1,0 0,1"`, `"1, 0; 0, 1"` and `"1 0 0 1"` are the same two points.
pub fn points(s: &str) -> Result<Vec<Point>> {
    let coords = coordinates(s)?;
    if coords.len() % 2 != 0 {
        bail!(
            "expected `x,y` pairs, got {} coordinates in {s:?}",
            coords.len()
        );
    }
    Ok(coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect())
}
