//! Scan conversion of curves and line segments.
//!
//! Every rasterizer is a pure function of its parameters and returns an
//! owned vector of pixels in traversal order. Anti-aliased variants return
//! [`PixelSample`]s carrying a coverage value in `[0, 1]`.
//!
//! # Algorithms
//!
//! - **Bresenham circle**: integer decision variable, 8-way symmetry
//! - **Midpoint ellipse**: two-region decision variable, 4-way symmetry
//! - **DDA / Bresenham / midpoint lines**: aliased segment walkers
//! - **Wu's line**: coverage split across the minor axis
//! - **Gupta–Sproull**: distance-weighted neighbourhood around a Bresenham walk
//! - **Midpoint parabola**: forward differences with mirror symmetry
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Bresenham, J. E. (1977). "A linear algorithm for incremental digital display of circular arcs."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Gupta, S., & Sproull, R. F. (1981). "Filtering edges for gray-scale displays." SIGGRAPH '81.

mod circle;
mod ellipse;
mod line;
mod parabola;

pub use circle::{arc_points, arc_segment_count, bresenham_circle, circle_spans};
pub use ellipse::{ellipse_spans, midpoint_ellipse, spans_from_boundary};
pub use line::{bresenham_line, dda_line, gupta_sproull_line, midpoint_line, wu_line, LineAlgorithm};
pub use parabola::midpoint_parabola;

use crate::error::{Error, Result};
use crate::geometry::IntPoint;

/// Largest radius, semi-axis or parabola extent the curve rasterizers
/// accept.
pub const MAX_EXTENT: i32 = 1 << 24;

/// Reject a curve whose box `center ± (half_width, half_height)` leaves the
/// `i32` pixel range. Extents must already be non-negative.
pub(crate) fn check_extent(center: IntPoint, half_width: i32, half_height: i32) -> Result<()> {
    if half_width > MAX_EXTENT || half_height > MAX_EXTENT {
        return Err(Error::geometry(format!(
            "extent {half_width}x{half_height} exceeds the maximum of {MAX_EXTENT}"
        )));
    }
    let fits = |c: i32, r: i32| c.checked_add(r).is_some() && c.checked_sub(r).is_some();
    if fits(center.x, half_width) && fits(center.y, half_height) {
        Ok(())
    } else {
        Err(Error::geometry(format!(
            "curve around {center} with extent {half_width}x{half_height} leaves the i32 pixel range"
        )))
    }
}

/// A rasterized pixel with fractional coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    /// Pixel position.
    pub point: IntPoint,
    /// Coverage in `[0, 1]`.
    pub coverage: f32,
}

impl PixelSample {
    /// Create a sample, clamping coverage into `[0, 1]`.
    #[must_use]
    pub fn new(point: IntPoint, coverage: f32) -> Self {
        Self { point, coverage: coverage.clamp(0.0, 1.0) }
    }

    /// A fully covered pixel.
    #[must_use]
    pub const fn solid(point: IntPoint) -> Self {
        Self { point, coverage: 1.0 }
    }
}

impl From<IntPoint> for PixelSample {
    fn from(point: IntPoint) -> Self {
        Self::solid(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_extent() {
        assert!(check_extent(IntPoint::new(0, 0), MAX_EXTENT, MAX_EXTENT).is_ok());
        assert!(check_extent(IntPoint::new(i32::MAX - 5, 0), 5, 0).is_ok());
        assert!(check_extent(IntPoint::new(i32::MAX - 5, 0), 6, 0).is_err());
        assert!(check_extent(IntPoint::new(0, i32::MIN), 0, 1).is_err());
        assert!(check_extent(IntPoint::new(0, 0), MAX_EXTENT + 1, 0).is_err());
    }
}
