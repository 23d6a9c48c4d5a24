//! Line segment scan conversion.
//!
//! Aliased walkers return plain pixels; Wu and Gupta–Sproull return
//! [`PixelSample`]s. All variants emit pixels from the first endpoint to
//! the second.

use crate::error::{Error, Result};
use crate::geometry::{IntPoint, Point};

use super::PixelSample;

/// Rasterize a segment with the digital differential analyzer.
///
/// Takes `steps = max(|dx|, |dy|)` fixed increments of `dx/steps` and
/// `dy/steps`, adding them to an `f32` accumulator and rounding each
/// sample half away from zero, for `steps + 1` pixels. Accumulated error
/// is not corrected, so on exact `.5` ties the sample depends on the
/// running sum rather than on `x0 + i·dx/steps`. Coordinates beyond
/// `±2^24` lose precision in the accumulator.
/// Coincident endpoints yield that single pixel.
#[must_use]
pub fn dda_line(p0: IntPoint, p1: IntPoint) -> Vec<IntPoint> {
    let dx = i64::from(p1.x) - i64::from(p0.x);
    let dy = i64::from(p1.y) - i64::from(p0.y);
    let steps = dx.abs().max(dy.abs());

    if steps == 0 {
        log::warn!("dda_line: zero-length segment at {p0}");
        return vec![p0];
    }

    let x_inc = dx as f32 / steps as f32;
    let y_inc = dy as f32 / steps as f32;
    let mut x = p0.x as f32;
    let mut y = p0.y as f32;

    let mut pixels = Vec::with_capacity(steps as usize + 1);
    for _ in 0..=steps {
        pixels.push(IntPoint::new(x.round() as i32, y.round() as i32));
        x += x_inc;
        y += y_inc;
    }
    pixels
}

/// Rasterize a segment with Bresenham's integer algorithm.
///
/// With `err = dx - dy` and `e2 = 2·err`, x advances when `e2 > -dy` and y
/// advances when `e2 < dx`, so diagonal steps happen in one iteration. The
/// walk always runs from the lexicographically smaller endpoint and is
/// reversed afterwards if needed, so swapping the endpoints yields the same
/// pixel set in the opposite order.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::IntPoint;
/// use trueno_raster::raster::bresenham_line;
///
/// let pixels = bresenham_line(IntPoint::new(1, 5), IntPoint::new(2, 8));
/// assert_eq!(pixels.len(), 4);
/// assert_eq!(pixels.last(), Some(&IntPoint::new(2, 8)));
/// ```
#[must_use]
pub fn bresenham_line(p0: IntPoint, p1: IntPoint) -> Vec<IntPoint> {
    if p1 < p0 {
        let mut pixels = bresenham_walk(p1, p0);
        pixels.reverse();
        pixels
    } else {
        bresenham_walk(p0, p1)
    }
}

// Coordinates stay between the endpoints; only the deltas need i64.
fn bresenham_walk(from: IntPoint, to: IntPoint) -> Vec<IntPoint> {
    let (tx, ty) = (i64::from(to.x), i64::from(to.y));
    let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
    let dx = (tx - x).abs();
    let dy = (ty - y).abs();
    let sx = if x < tx { 1 } else { -1 };
    let sy = if y < ty { 1 } else { -1 };
    let mut err = dx - dy;

    let mut pixels = Vec::with_capacity(dx.max(dy) as usize + 1);

    loop {
        pixels.push(IntPoint::new(x as i32, y as i32));
        if x == tx && y == ty {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    pixels
}

/// Rasterize a segment with the midpoint decision variable `d = 2dy - dx`.
///
/// Roles of x and y are exchanged for steep segments; the major axis
/// advances every step and the minor axis whenever `d > 0`.
#[must_use]
pub fn midpoint_line(p0: IntPoint, p1: IntPoint) -> Vec<IntPoint> {
    let (mut x, mut y) = (i64::from(p0.x), i64::from(p0.y));
    let mut dx = (i64::from(p1.x) - x).abs();
    let mut dy = (i64::from(p1.y) - y).abs();
    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };
    let steep = dy > dx;
    if steep {
        std::mem::swap(&mut dx, &mut dy);
    }

    let mut d = 2 * dy - dx;
    let mut pixels = Vec::with_capacity(dx as usize + 1);

    for _ in 0..=dx {
        pixels.push(IntPoint::new(x as i32, y as i32));
        if d > 0 {
            if steep {
                x += sx;
            } else {
                y += sy;
            }
            d -= 2 * dx;
        }
        if steep {
            y += sy;
        } else {
            x += sx;
        }
        d += 2 * dy;
    }
    pixels
}

/// Rasterize an anti-aliased segment with Xiaolin Wu's algorithm.
///
/// For each column along the major axis two pixels straddling the ideal
/// line share the column's coverage according to the fractional part of
/// the running intercept, so the pair always sums to 1. Endpoints are
/// rounded to the nearest column and split the same way.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] for coincident or non-finite
/// endpoints.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn wu_line(p0: Point, p1: Point) -> Result<Vec<PixelSample>> {
    if !(p0.is_finite() && p1.is_finite()) {
        return Err(Error::geometry("line endpoints must be finite"));
    }
    if p0 == p1 {
        return Err(Error::geometry(format!("zero-length segment at ({}, {})", p0.x, p0.y)));
    }

    let steep = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();
    let (x0, y0, x1, y1) = if steep { (p0.y, p0.x, p1.y, p1.x) } else { (p0.x, p0.y, p1.x, p1.y) };
    let reversed = x0 > x1;
    let (x0, y0, x1, y1) = if reversed { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

    let mut samples = Vec::new();
    let mut plot = |major: i32, minor: i32, coverage: f32| {
        let point = if steep { IntPoint::new(minor, major) } else { IntPoint::new(major, minor) };
        samples.push(PixelSample::new(point, coverage));
    };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;
    plot(xpxl1, ypxl1, rfpart(yend));
    plot(xpxl1, ypxl1 + 1, fpart(yend));
    let mut intery = yend + gradient;

    // Second endpoint, plotted after the interior
    let xend = x1.round();
    let yend2 = y1 + gradient * (xend - x1);
    let xpxl2 = xend as i32;

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i32;
        plot(x, ipart, rfpart(intery));
        plot(x, ipart + 1, fpart(intery));
        intery += gradient;
    }

    if xpxl2 != xpxl1 {
        let ypxl2 = yend2.floor() as i32;
        plot(xpxl2, ypxl2, rfpart(yend2));
        plot(xpxl2, ypxl2 + 1, fpart(yend2));
    }

    if reversed {
        samples.reverse();
    }

    log::debug!("wu_line: steep={steep} gradient={gradient} -> {} samples", samples.len());
    Ok(samples)
}

/// Rasterize an anti-aliased segment with the Gupta–Sproull filter.
///
/// Walks the Bresenham path; each step emits the main pixel at full
/// coverage followed by its eight neighbours weighted by
/// `1 - distance / radius`, where `radius = line_width / 2`. Neighbours
/// farther than `radius` get zero coverage.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] unless `line_width` is positive and
/// finite.
///
/// # References
///
/// Gupta, S., & Sproull, R. F. (1981). "Filtering edges for gray-scale displays."
pub fn gupta_sproull_line(p0: IntPoint, p1: IntPoint, line_width: f32) -> Result<Vec<PixelSample>> {
    if !(line_width.is_finite() && line_width > 0.0) {
        return Err(Error::geometry(format!("line width must be positive, got {line_width}")));
    }
    let radius = line_width / 2.0;

    let path = bresenham_line(p0, p1);
    let mut samples = Vec::with_capacity(path.len() * 9);

    for p in path {
        samples.push(PixelSample::solid(p));
        for i in -1..=1 {
            for j in -1..=1 {
                if i == 0 && j == 0 {
                    continue;
                }
                let distance = ((i * i + j * j) as f32).sqrt();
                samples.push(PixelSample::new(p.offset(i, j), falloff(distance, radius)));
            }
        }
    }

    log::debug!("gupta_sproull_line: width={line_width} -> {} samples", samples.len());
    Ok(samples)
}

/// Linear intensity falloff, zero outside `radius`.
#[inline]
fn falloff(distance: f32, radius: f32) -> f32 {
    if distance > radius {
        0.0
    } else {
        1.0 - distance / radius
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

/// Line rasterizer selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAlgorithm {
    /// Digital differential analyzer.
    Dda,
    /// Bresenham's integer algorithm.
    Bresenham,
    /// Midpoint decision variable.
    Midpoint,
    /// Xiaolin Wu's anti-aliased line.
    Wu,
    /// Gupta–Sproull distance-filtered line.
    GuptaSproull,
}

impl LineAlgorithm {
    /// Every variant.
    pub const ALL: [Self; 5] = [Self::Dda, Self::Bresenham, Self::Midpoint, Self::Wu, Self::GuptaSproull];

    /// Short kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dda => "dda",
            Self::Bresenham => "bresenham",
            Self::Midpoint => "midpoint",
            Self::Wu => "wu",
            Self::GuptaSproull => "gupta-sproull",
        }
    }

    /// Whether the variant produces partial coverage.
    #[must_use]
    pub const fn is_antialiased(self) -> bool {
        matches!(self, Self::Wu | Self::GuptaSproull)
    }

    /// Rasterize `p0`–`p1` with this algorithm. Aliased variants report
    /// full coverage; `line_width` only affects Gupta–Sproull.
    ///
    /// # Errors
    ///
    /// Propagates the selected rasterizer's errors.
    pub fn rasterize(self, p0: IntPoint, p1: IntPoint, line_width: f32) -> Result<Vec<PixelSample>> {
        let solid = |pixels: Vec<IntPoint>| -> Vec<PixelSample> {
            pixels.into_iter().map(PixelSample::solid).collect()
        };
        match self {
            Self::Dda => Ok(solid(dda_line(p0, p1))),
            Self::Bresenham => Ok(solid(bresenham_line(p0, p1))),
            Self::Midpoint => Ok(solid(midpoint_line(p0, p1))),
            Self::Wu => wu_line(p0.to_point(), p1.to_point()),
            Self::GuptaSproull => gupta_sproull_line(p0, p1, line_width),
        }
    }
}

impl std::fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LineAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
