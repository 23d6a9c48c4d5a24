//! Midpoint ellipse scan conversion.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::{IntPoint, Span};

use super::check_extent;

/// Rasterize an axis-aligned ellipse outline with the two-region midpoint
/// algorithm.
///
/// `a` is the semi-axis along x, `b` along y. Region 1 walks from `(0, b)`
/// stepping x while the slope magnitude is at most 1; region 2 steps y down
/// to the major axis. Each visited point is emitted with its four mirror
/// images `(±x, ±y)`, so points on the axes repeat.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] unless both semi-axes are positive,
/// at most [`MAX_EXTENT`](crate::raster::MAX_EXTENT), and the ellipse fits in `i32` pixel space.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::IntPoint;
/// use trueno_raster::raster::midpoint_ellipse;
///
/// let pixels = midpoint_ellipse(IntPoint::new(2, -1), 6, 5).unwrap();
/// assert!(pixels.contains(&IntPoint::new(8, -1)));
/// assert!(pixels.contains(&IntPoint::new(2, 4)));
/// ```
pub fn midpoint_ellipse(center: IntPoint, a: i32, b: i32) -> Result<Vec<IntPoint>> {
    if a <= 0 || b <= 0 {
        return Err(Error::geometry(format!("ellipse semi-axes must be positive, got a={a} b={b}")));
    }
    check_extent(center, a, b)?;

    let a2 = f64::from(a) * f64::from(a);
    let b2 = f64::from(b) * f64::from(b);

    let mut points = Vec::new();
    let mut emit = |x: i32, y: i32| {
        points.extend_from_slice(&[
            center.offset(x, y),
            center.offset(-x, y),
            center.offset(-x, -y),
            center.offset(x, -y),
        ]);
    };

    let mut x = 0;
    let mut y = b;

    // Region 1: |slope| <= 1
    let mut d1 = b2 - a2 * f64::from(b) + 0.25 * a2;
    emit(x, y);
    while a2 * (f64::from(y) - 0.5) > b2 * f64::from(x + 1) {
        if d1 < 0.0 {
            d1 += b2 * f64::from(2 * x + 3);
        } else {
            d1 += b2 * f64::from(2 * x + 3) + a2 * f64::from(-2 * y + 2);
            y -= 1;
        }
        x += 1;
        emit(x, y);
    }

    // Region 2: |slope| > 1
    let xh = f64::from(x) + 0.5;
    let ym = f64::from(y - 1);
    let mut d2 = b2 * xh * xh + a2 * ym * ym - a2 * b2;
    while y > 0 {
        if d2 < 0.0 {
            d2 += b2 * f64::from(2 * x + 2) + a2 * f64::from(-2 * y + 3);
            x += 1;
        } else {
            d2 += a2 * f64::from(-2 * y + 3);
        }
        y -= 1;
        emit(x, y);
    }

    log::debug!("midpoint_ellipse: a={a} b={b} -> {} points", points.len());
    Ok(points)
}

/// Filled ellipse interior as horizontal spans, top to bottom.
///
/// # Errors
///
/// Same conditions as [`midpoint_ellipse`].
pub fn ellipse_spans(center: IntPoint, a: i32, b: i32) -> Result<Vec<Span>> {
    Ok(spans_from_boundary(&midpoint_ellipse(center, a, b)?))
}

/// Horizontal spans joining the leftmost and rightmost boundary pixel on
/// each scanline, ordered by `y`.
///
/// Exact for boundaries of convex shapes (circles, ellipses); concave
/// outlines get their holes filled.
#[must_use]
pub fn spans_from_boundary(boundary: &[IntPoint]) -> Vec<Span> {
    let mut rows: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
    for p in boundary {
        rows.entry(p.y)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(p.x);
                *hi = (*hi).max(p.x);
            })
            .or_insert((p.x, p.x));
    }
    rows.into_iter().map(|(y, (lo, hi))| Span::new(y, lo, hi)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_extremes() {
        let center = IntPoint::new(2, -1);
        let pixels = midpoint_ellipse(center, 6, 5).unwrap();

        let max_x = pixels.iter().map(|p| p.x).max().unwrap();
        let min_x = pixels.iter().map(|p| p.x).min().unwrap();
        let max_y = pixels.iter().map(|p| p.y).max().unwrap();
        let min_y = pixels.iter().map(|p| p.y).min().unwrap();
        assert_eq!((min_x, max_x), (-4, 8));
        assert_eq!((min_y, max_y), (-6, 4));

        for p in [IntPoint::new(8, -1), IntPoint::new(-4, -1), IntPoint::new(2, 4), IntPoint::new(2, -6)] {
            assert!(pixels.contains(&p), "missing {p}");
        }
    }

    #[test]
    fn test_flat_ellipse_region_two_stops_short() {
        // Region 2 reaches y = 0 before x reaches a on these flat shapes.
        for (a, b, reached) in [(6, 2, 5), (10, 1, 9), (20, 2, 20)] {
            let pixels = midpoint_ellipse(IntPoint::new(0, 0), a, b).unwrap();
            let max_x = pixels.iter().map(|p| p.x).max().unwrap();
            let max_y = pixels.iter().map(|p| p.y).max().unwrap();
            assert_eq!(max_x, reached, "a={a} b={b}");
            assert_eq!(max_y, b, "a={a} b={b}");
        }
    }

    #[test]
    fn test_ellipse_out_of_range() {
        assert!(midpoint_ellipse(IntPoint::new(i32::MIN + 3, 0), 4, 2).is_err());
        assert!(midpoint_ellipse(IntPoint::new(0, i32::MAX - 1), 4, 2).is_err());
        assert!(ellipse_spans(IntPoint::new(i32::MIN + 4, i32::MAX - 2), 4, 2).is_ok());
    }

    #[test]
    fn test_ellipse_circle_case_near_radius() {
        for p in midpoint_ellipse(IntPoint::new(0, 0), 12, 12).unwrap() {
            let dist = ((p.x * p.x + p.y * p.y) as f32).sqrt();
            assert!((dist - 12.0).abs() <= 1.0, "{p}");
        }
    }

    #[test]
    fn test_ellipse_four_way_symmetry() {
        let pixels = midpoint_ellipse(IntPoint::new(0, 0), 9, 4).unwrap();
        for p in &pixels {
            assert!(pixels.contains(&IntPoint::new(-p.x, p.y)));
            assert!(pixels.contains(&IntPoint::new(p.x, -p.y)));
        }
    }

    #[test]
    fn test_ellipse_invalid_axes() {
        assert!(midpoint_ellipse(IntPoint::new(0, 0), 0, 5).is_err());
        assert!(midpoint_ellipse(IntPoint::new(0, 0), 5, -1).is_err());
    }

    #[test]
    fn test_ellipse_spans() {
        let spans = ellipse_spans(IntPoint::new(2, -1), 6, 5).unwrap();
        assert_eq!(spans.len(), 11);
        assert_eq!(spans.first().map(|s| s.y), Some(-6));
        let axis = spans.iter().find(|s| s.y == -1).unwrap();
        assert_eq!((axis.x_start, axis.x_end), (-4, 8));
    }

    #[test]
    fn test_spans_from_boundary() {
        let boundary = [IntPoint::new(3, 0), IntPoint::new(-1, 0), IntPoint::new(0, 1), IntPoint::new(1, 0)];
        let spans = spans_from_boundary(&boundary);
        assert_eq!(spans, vec![Span::new(0, -1, 3), Span::new(1, 0, 0)]);
    }
}
