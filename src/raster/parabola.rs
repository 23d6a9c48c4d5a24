//! Midpoint scan conversion of the parabola `x = k·y²`.

use crate::error::{Error, Result};
use crate::geometry::IntPoint;

use super::check_extent;

/// Rasterize `x = k·y²` for `-y_extent <= y <= y_extent`, with the vertex
/// at `vertex`.
///
/// One scanline per step: moving from `y` to `y + 1` the curve advances by
/// the exact forward difference `k(2y + 1)`, so no multiplication or
/// rounding is needed. Each step emits the point and its mirror image
/// across the axis; the vertex is emitted once, first.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] for `k == 0`, a negative extent, an
/// extent above [`MAX_EXTENT`](crate::raster::MAX_EXTENT), or a curve that leaves `i32` pixel space.
pub fn midpoint_parabola(vertex: IntPoint, k: i32, y_extent: i32) -> Result<Vec<IntPoint>> {
    if k == 0 {
        return Err(Error::geometry("parabola coefficient must be non-zero"));
    }
    if y_extent < 0 {
        return Err(Error::geometry(format!("parabola extent must be non-negative, got {y_extent}")));
    }

    check_extent(vertex, 0, y_extent)?;
    let tip = i64::from(y_extent)
        .checked_mul(i64::from(y_extent))
        .and_then(|y2| y2.checked_mul(i64::from(k)))
        .and_then(|reach| reach.checked_add(i64::from(vertex.x)))
        .filter(|tip| i32::try_from(*tip).is_ok());
    if tip.is_none() {
        return Err(Error::geometry(format!(
            "parabola k={k} extent={y_extent} from {vertex} leaves the i32 pixel range"
        )));
    }

    let mut points = Vec::with_capacity(2 * y_extent as usize + 1);
    points.push(vertex);

    // x lies between vertex.x and the tip, so it fits in i32.
    let mut x = i64::from(vertex.x);
    for y in 0..y_extent {
        x += i64::from(k) * i64::from(2 * y + 1);
        points.push(IntPoint::new(x as i32, vertex.y + y + 1));
        points.push(IntPoint::new(x as i32, vertex.y - (y + 1)));
    }

    log::debug!("midpoint_parabola: k={k} extent={y_extent} -> {} points", points.len());
    Ok(points)
}
