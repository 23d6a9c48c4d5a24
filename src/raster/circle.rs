//! Circle scan conversion and arc tessellation.

use crate::error::{Error, Result};
use crate::geometry::{IntPoint, Point, Span};

use super::check_extent;

/// Rasterize a circle outline with Bresenham's integer algorithm.
///
/// Starting at `(0, r)` with `d = 3 - 2r`, each step emits the eight
/// symmetric points and then advances `x`, stepping `y` down whenever
/// `d` is non-negative. Points on the octant boundary `x == y` repeat.
///
/// A zero radius yields the centre pixel alone.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] for a negative radius, a radius above
/// [`MAX_EXTENT`](crate::raster::MAX_EXTENT), or a circle that does not fit in `i32` pixel space.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::IntPoint;
/// use trueno_raster::raster::bresenham_circle;
///
/// let pixels = bresenham_circle(IntPoint::new(0, 0), 5).unwrap();
/// assert!(pixels.contains(&IntPoint::new(0, 5)));
/// assert!(pixels.contains(&IntPoint::new(-5, 0)));
/// ```
pub fn bresenham_circle(center: IntPoint, radius: i32) -> Result<Vec<IntPoint>> {
    if radius < 0 {
        return Err(Error::geometry(format!("circle radius must be non-negative, got {radius}")));
    }
    check_extent(center, radius, radius)?;
    if radius == 0 {
        log::warn!("bresenham_circle: zero radius at {center}, emitting centre only");
        return Ok(vec![center]);
    }

    let IntPoint { x: cx, y: cy } = center;
    let mut x = 0;
    let mut y = radius;
    let mut d = 3 - 2 * radius;

    let mut points = Vec::with_capacity(8 * (radius as usize + 1));
    while x <= y {
        points.extend_from_slice(&[
            IntPoint::new(cx + x, cy + y),
            IntPoint::new(cx - x, cy + y),
            IntPoint::new(cx + x, cy - y),
            IntPoint::new(cx - x, cy - y),
            IntPoint::new(cx + y, cy + x),
            IntPoint::new(cx - y, cy + x),
            IntPoint::new(cx + y, cy - x),
            IntPoint::new(cx - y, cy - x),
        ]);

        if d < 0 {
            d += 4 * x + 6;
        } else {
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;
    }

    log::debug!("bresenham_circle: r={radius} -> {} points", points.len());
    Ok(points)
}

/// Filled disc as horizontal spans, one per scanline from top to bottom.
///
/// Uses the midpoint recurrence `err = 1 - r` and keeps the widest run
/// seen on each scanline.
///
/// # Errors
///
/// Same conditions as [`bresenham_circle`].
pub fn circle_spans(center: IntPoint, radius: i32) -> Result<Vec<Span>> {
    if radius < 0 {
        return Err(Error::geometry(format!("circle radius must be non-negative, got {radius}")));
    }
    check_extent(center, radius, radius)?;

    let IntPoint { x: cx, y: cy } = center;
    // half_width[dy] for dy in 0..=radius
    let mut half_width = vec![0; radius as usize + 1];

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        half_width[y as usize] = half_width[y as usize].max(x);
        half_width[x as usize] = half_width[x as usize].max(y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    let mut spans = Vec::with_capacity(2 * radius as usize + 1);
    for dy in (1..=radius).rev() {
        let w = half_width[dy as usize];
        spans.push(Span::new(cy - dy, cx - w, cx + w));
    }
    for dy in 0..=radius {
        let w = half_width[dy as usize];
        spans.push(Span::new(cy + dy, cx - w, cx + w));
    }
    Ok(spans)
}

/// Number of chords needed to approximate an arc of `sweep_deg` degrees
/// on a circle of `radius` so that no chord strays more than `tolerance`
/// from the true arc.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] for a non-positive radius or
/// tolerance, or non-finite input.
pub fn arc_segment_count(radius: f32, sweep_deg: f32, tolerance: f32) -> Result<usize> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(Error::geometry(format!("arc radius must be positive, got {radius}")));
    }
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(Error::geometry(format!("arc tolerance must be positive, got {tolerance}")));
    }
    if !sweep_deg.is_finite() {
        return Err(Error::geometry("arc sweep must be finite"));
    }

    // Sagitta of a chord subtending angle t: r(1 - cos(t/2)).
    let max_step = if tolerance >= radius {
        std::f32::consts::PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    let sweep = sweep_deg.abs().to_radians();
    Ok(((sweep / max_step).ceil() as usize).max(1))
}

/// Points along an arc from `start_deg` through `sweep_deg` degrees
/// (counter-clockwise for positive sweep), including both ends.
///
/// The segment count comes from [`arc_segment_count`], so accuracy is set
/// by `tolerance` rather than a fixed angular step.
///
/// # Errors
///
/// Same conditions as [`arc_segment_count`].
pub fn arc_points(
    center: Point,
    radius: f32,
    start_deg: f32,
    sweep_deg: f32,
    tolerance: f32,
) -> Result<Vec<Point>> {
    let segments = arc_segment_count(radius, sweep_deg, tolerance)?;
    let start = start_deg.to_radians();
    let step = sweep_deg.to_radians() / segments as f32;

    Ok((0..=segments)
        .map(|i| {
            let (sin, cos) = (start + step * i as f32).sin_cos();
            Point::new(center.x + radius * cos, center.y + radius * sin)
        })
        .collect())
}
