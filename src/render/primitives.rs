//! Plotting rasterizer output into a framebuffer.
//!
//! Rasterizers work on the world's integer grid; these functions map that
//! grid through a [`Viewport`] and paint each world pixel as a square of
//! framebuffer pixels, the way a fixed point size would on screen.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Circle, IntPoint, Line, Point, Polygon};
use crate::pie::PieSlice;
use crate::raster::{arc_points, bresenham_line, PixelSample};

use super::Viewport;

/// Tick half-length in framebuffer pixels.
const TICK_HALF_LENGTH: i32 = 3;

/// Upper bound on ticks per axis; denser spacings are skipped.
const MAX_TICKS: i32 = 512;

/// Trait for shapes that can be drawn through a viewport.
pub trait Drawable {
    /// Draw the outline of this shape.
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba);

    /// Draw this shape filled, if it has an interior.
    fn fill(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        self.draw(fb, viewport, color);
    }
}

// ============================================================================
// Points
// ============================================================================

/// Paint a square of `size` framebuffer pixels centred on a world pixel.
pub fn plot_point(fb: &mut Framebuffer, viewport: &Viewport, p: IntPoint, size: f32, color: Rgba) {
    let center = viewport.to_pixel(p.to_point());
    let side = size.round().max(1.0) as i32;
    let start = IntPoint::new(center.x - (side - 1) / 2, center.y - (side - 1) / 2);

    for dy in 0..side {
        for dx in 0..side {
            let px = start.offset(dx, dy);
            if fb.in_bounds(px) {
                fb.blend_pixel(px.x as u32, px.y as u32, color);
            }
        }
    }
}

/// Paint every world pixel in `points`.
pub fn plot_points(fb: &mut Framebuffer, viewport: &Viewport, points: &[IntPoint], size: f32, color: Rgba) {
    for &p in points {
        plot_point(fb, viewport, p, size, color);
    }
}

/// Paint anti-aliased samples, scaling alpha by each sample's coverage.
pub fn plot_samples(
    fb: &mut Framebuffer,
    viewport: &Viewport,
    samples: &[PixelSample],
    size: f32,
    color: Rgba,
) {
    for sample in samples.iter().filter(|s| s.coverage > 0.0) {
        plot_point(fb, viewport, sample.point, size, color.with_coverage(sample.coverage));
    }
}

// ============================================================================
// Outlines and fills
// ============================================================================

/// Draw a one-pixel segment between two framebuffer positions.
pub fn draw_segment(fb: &mut Framebuffer, p0: IntPoint, p1: IntPoint, color: Rgba) {
    for p in bresenham_line(p0, p1) {
        if fb.in_bounds(p) {
            fb.set_pixel(p.x as u32, p.y as u32, color);
        }
    }
}

/// Draw connected world-space segments, joining the last point back to
/// the first when `closed` is set.
pub fn draw_polyline(fb: &mut Framebuffer, viewport: &Viewport, points: &[Point], closed: bool, color: Rgba) {
    let pixels: Vec<IntPoint> = points.iter().map(|&p| viewport.to_pixel(p)).collect();
    for pair in pixels.windows(2) {
        draw_segment(fb, pair[0], pair[1], color);
    }
    if closed && pixels.len() > 2 {
        if let (Some(&first), Some(&last)) = (pixels.first(), pixels.last()) {
            draw_segment(fb, last, first, color);
        }
    }
}

/// Scanline-fill a world-space polygon.
pub fn fill_polygon(fb: &mut Framebuffer, viewport: &Viewport, polygon: &Polygon, color: Rgba) {
    for span in polygon.transformed(&viewport.transform()).fill_spans() {
        fb.fill_span(span, color);
    }
}

/// Draw the coordinate axes with a tick every `tick_spacing` world units.
///
/// An axis that falls outside the viewport is drawn along the nearest
/// edge instead.
pub fn draw_axes(fb: &mut Framebuffer, viewport: &Viewport, tick_spacing: f32, color: Rgba) {
    let world = viewport.world();
    let axis_x = 0.0_f32.clamp(world.x, world.max_x());
    let axis_y = 0.0_f32.clamp(world.y, world.max_y());

    let left = viewport.to_pixel(Point::new(world.x, axis_y));
    let right = viewport.to_pixel(Point::new(world.max_x(), axis_y));
    let top = viewport.to_pixel(Point::new(axis_x, world.max_y()));
    let bottom = viewport.to_pixel(Point::new(axis_x, world.y));
    draw_segment(fb, left, right, color);
    draw_segment(fb, top, bottom, color);

    if !(tick_spacing.is_finite() && tick_spacing > 0.0) {
        return;
    }

    for x in tick_range(world.x, world.max_x(), tick_spacing) {
        let p = viewport.to_pixel(Point::new(x as f32 * tick_spacing, axis_y));
        draw_segment(fb, p.offset(0, -TICK_HALF_LENGTH), p.offset(0, TICK_HALF_LENGTH), color);
    }
    for y in tick_range(world.y, world.max_y(), tick_spacing) {
        let p = viewport.to_pixel(Point::new(axis_x, y as f32 * tick_spacing));
        draw_segment(fb, p.offset(-TICK_HALF_LENGTH, 0), p.offset(TICK_HALF_LENGTH, 0), color);
    }
}

/// Tick indices `i` with `min <= i * spacing <= max`, or nothing when
/// there would be too many to read.
fn tick_range(min: f32, max: f32, spacing: f32) -> std::ops::RangeInclusive<i32> {
    let first = (min / spacing).ceil() as i32;
    let last = (max / spacing).floor() as i32;
    if last.saturating_sub(first) > MAX_TICKS {
        #[allow(clippy::reversed_empty_ranges)]
        return 1..=0;
    }
    first..=last
}

// ============================================================================
// Drawable implementations
// ============================================================================

impl Drawable for Line {
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        draw_segment(fb, viewport.to_pixel(self.start), viewport.to_pixel(self.end), color);
    }
}

impl Drawable for Polygon {
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        draw_polyline(fb, viewport, self.vertices(), true, color);
    }

    fn fill(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        fill_polygon(fb, viewport, self, color);
    }
}

impl Drawable for Circle {
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        // Quarter-pixel chordal error at the framebuffer's resolution.
        let tolerance = 0.25 / viewport.pixels_per_unit();
        match arc_points(self.center, self.radius, 0.0, 360.0, tolerance) {
            Ok(points) => draw_polyline(fb, viewport, &points, true, color),
            Err(_) => plot_point(fb, viewport, self.center.round(), 1.0, color),
        }
    }

    fn fill(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        let tolerance = 0.25 / viewport.pixels_per_unit();
        let outline = arc_points(self.center, self.radius, 0.0, 360.0, tolerance).and_then(Polygon::new);
        match outline {
            Ok(polygon) => fill_polygon(fb, viewport, &polygon, color),
            Err(_) => plot_point(fb, viewport, self.center.round(), 1.0, color),
        }
    }
}

impl Drawable for PieSlice {
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        draw_polyline(fb, viewport, &self.outline, true, color);
    }

    fn fill(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        if let Ok(polygon) = self.polygon() {
            fill_polygon(fb, viewport, &polygon, color);
        }
    }
}
