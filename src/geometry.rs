//! Geometric primitives for rasterization.
//!
//! Real-valued [`Point`]s describe continuous geometry; [`IntPoint`]s are
//! positions on the pixel grid, where integer coordinates name pixel
//! centres. [`Polygon`] carries the crossing-number interior test and the
//! scanline fill built on the same half-open edge rule.

use crate::error::{Error, Result};
use crate::transform::Affine2D;

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Round to the nearest pixel (halfway cases away from zero).
    #[must_use]
    pub fn round(self) -> IntPoint {
        IntPoint::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A position on the integer pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IntPoint {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl IntPoint {
    /// Create a new pixel position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Convert to a real-valued point at the pixel centre.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for IntPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for IntPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the minimum corner.
    pub x: f32,
    /// Y coordinate of the minimum corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle enclosing every point, or `None` for an empty set.
    #[must_use]
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    /// Maximum x coordinate.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Maximum y coordinate.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(self.x - margin, self.y - margin, self.width + 2.0 * margin, self.height + 2.0 * margin)
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// An inclusive horizontal run of pixels on one scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Scanline.
    pub y: i32,
    /// First pixel of the run.
    pub x_start: i32,
    /// Last pixel of the run (inclusive).
    pub x_end: i32,
}

impl Span {
    /// Create a span, ordering the endpoints.
    #[must_use]
    pub fn new(y: i32, x0: i32, x1: i32) -> Self {
        Self { y, x_start: x0.min(x1), x_end: x0.max(x1) }
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.x_end - self.x_start + 1) as usize
    }

    /// Spans always cover at least one pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the pixels of the span from left to right.
    pub fn pixels(&self) -> impl Iterator<Item = IntPoint> + '_ {
        (self.x_start..=self.x_end).map(move |x| IntPoint::new(x, self.y))
    }
}

/// A circle in continuous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Centre.
    pub center: Point,
    /// Radius.
    pub radius: f32,
}

/// A triangle given by its three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices in order.
    pub vertices: [Point; 3],
}

impl Triangle {
    /// Create a triangle.
    #[must_use]
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// The circle passing through all three vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] when the vertices are collinear.
    pub fn circumcircle(&self) -> Result<Circle> {
        let [a, b, c] = self.vertices;
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < f32::EPSILON || !d.is_finite() {
            return Err(Error::geometry("triangle vertices are collinear"));
        }

        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let center = Point::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );

        Ok(Circle { center, radius: center.distance(a) })
    }
}

/// A closed polygon with at least three vertices.
///
/// The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its ordered vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] for fewer than three vertices or
    /// non-finite coordinates.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::geometry(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(bad) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(Error::geometry(format!("non-finite polygon vertex {bad:?}")));
        }
        Ok(Self { vertices })
    }

    /// Vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Consume the polygon, returning its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Edges as `(current, previous)` vertex pairs, starting with
    /// `(v[0], v[n-1])`.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + n - 1) % n]))
    }

    /// Crossing-number (even-odd) interior test.
    ///
    /// An edge counts when the horizontal ray through `point` straddles it
    /// under the half-open rule `(vi.y > y) != (vj.y > y)`, so a ray through
    /// a shared vertex is counted once and horizontal edges never count.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let mut inside = false;
        for (vi, vj) in self.edges() {
            if (vi.y > point.y) != (vj.y > point.y) && point.x < edge_intercept(vi, vj, point.y) {
                inside = !inside;
            }
        }
        inside
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        // A polygon always has vertices.
        Rect::bounding(self.vertices.iter().copied()).unwrap_or_default()
    }

    /// Average of the vertices.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let n = self.vertices.len() as f32;
        let (sx, sy) = self.vertices.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    /// Scanline fill at integer scanlines.
    ///
    /// A pixel `(x, y)` belongs to a span exactly when
    /// `contains(Point::new(x, y))` holds.
    #[must_use]
    pub fn fill_spans(&self) -> Vec<Span> {
        let bounds = self.bounds();
        let y_min = bounds.y.ceil() as i32;
        let y_max = bounds.max_y().floor() as i32;

        let mut spans = Vec::new();
        let mut crossings: Vec<f32> = Vec::with_capacity(self.vertices.len());

        for y in y_min..=y_max {
            let yf = y as f32;
            crossings.clear();
            crossings.extend(
                self.edges()
                    .filter(|(vi, vj)| (vi.y > yf) != (vj.y > yf))
                    .map(|(vi, vj)| edge_intercept(vi, vj, yf)),
            );
            crossings.sort_by(f32::total_cmp);

            // Pixels in [c0, c1) are inside, [c1, c2) outside, ...
            for pair in crossings.chunks_exact(2) {
                let x_start = pair[0].ceil() as i32;
                let x_end = pair[1].ceil() as i32 - 1;
                if x_start <= x_end {
                    spans.push(Span { y, x_start, x_end });
                }
            }
        }

        log::debug!("polygon fill: {} vertices -> {} spans", self.vertices.len(), spans.len());
        spans
    }

    /// Grid positions inside the polygon, starting at the bounding box's
    /// minimum corner and advancing by `step` in both axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] when `step` is not positive and
    /// finite.
    pub fn interior_grid(&self, step: f32) -> Result<Vec<Point>> {
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::geometry(format!("grid step must be positive, got {step}")));
        }

        let bounds = self.bounds();
        let columns = (bounds.width / step).floor() as usize;
        let rows = (bounds.height / step).floor() as usize;

        let mut points = Vec::new();
        for i in 0..=columns {
            let x = bounds.x + i as f32 * step;
            for j in 0..=rows {
                let p = Point::new(x, bounds.y + j as f32 * step);
                if self.contains(p) {
                    points.push(p);
                }
            }
        }
        Ok(points)
    }

    /// Apply an affine transform to every vertex.
    #[must_use]
    pub fn transformed(&self, transform: &Affine2D) -> Self {
        Self { vertices: transform.apply_all(&self.vertices) }
    }
}

/// X coordinate where edge `vi`-`vj` crosses scanline `y`.
///
/// Callers guarantee `vi.y != vj.y`.
#[inline]
fn edge_intercept(vi: Point, vj: Point, y: f32) -> f32 {
    (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagon() -> Polygon {
        Polygon::new(vec![
            Point::new(8.0, 4.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 8.0),
            Point::new(3.0, 12.0),
            Point::new(7.0, 12.0),
            Point::new(10.0, 8.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_point_lerp() {
        let mid = Point::new(0.0, 0.0).lerp(Point::new(10.0, 10.0), 0.5);
        assert!((mid.x - 5.0).abs() < 0.001);
        assert!((mid.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_point_round() {
        assert_eq!(Point::new(1.5, -1.5).round(), IntPoint::new(2, -2));
        assert_eq!(Point::new(0.49, 2.51).round(), IntPoint::new(0, 3));
    }

    #[test]
    fn test_line_length() {
        let line = Line::from_coords(0.0, 0.0, 3.0, 4.0);
        assert!((line.length() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_rect_bounding() {
        let rect = Rect::bounding([Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)])
            .unwrap();
        assert_eq!(rect, Rect::new(-2.0, -1.0, 6.0, 6.0));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn test_span_pixels() {
        let span = Span::new(3, 5, 2);
        assert_eq!(span.x_start, 2);
        assert_eq!(span.len(), 4);
        let pixels: Vec<_> = span.pixels().collect();
        assert_eq!(pixels.first(), Some(&IntPoint::new(2, 3)));
        assert_eq!(pixels.last(), Some(&IntPoint::new(5, 3)));
    }

    #[test]
    fn test_polygon_requires_three_vertices() {
        let err = Polygon::new(vec![Point::ORIGIN, Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry(_)));
    }

    #[test]
    fn test_polygon_rejects_nan() {
        let result = Polygon::new(vec![Point::ORIGIN, Point::new(f32::NAN, 1.0), Point::new(1.0, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_polygon_contains() {
        let poly = hexagon();
        assert!(poly.contains(Point::new(5.0, 8.0)));
        assert!(poly.contains(Point::new(1.0, 8.0)));
        assert!(!poly.contains(Point::new(11.0, 8.0)));
        assert!(!poly.contains(Point::new(5.0, 13.0)));
        assert!(!poly.contains(Point::new(0.5, 4.5)));
    }

    #[test]
    fn test_polygon_ray_through_vertex_counted_once() {
        // The ray at y = 8 passes through vertices (0, 8) and (10, 8).
        let poly = hexagon();
        assert!(poly.contains(Point::new(9.0, 8.0)));
        assert!(!poly.contains(Point::new(-1.0, 8.0)));
    }

    #[test]
    fn test_polygon_bounds_and_centroid() {
        let square = Polygon::new(vec![
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(square.bounds(), Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(square.centroid(), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_fill_spans_match_contains() {
        let poly = hexagon();
        let spans = poly.fill_spans();
        assert!(!spans.is_empty());
        for span in &spans {
            for p in span.pixels() {
                assert!(poly.contains(p.to_point()), "{p} should be inside");
            }
            // One pixel past either end is outside.
            assert!(!poly.contains(IntPoint::new(span.x_end + 1, span.y).to_point()));
        }
    }

    #[test]
    fn test_fill_spans_square() {
        let square = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap();
        let spans = square.fill_spans();
        // Half-open in both axes: rows 0..4, columns 0..4.
        assert_eq!(spans.len(), 4);
        assert!(spans.iter().all(|s| s.x_start == 0 && s.x_end == 3));
        assert_eq!(spans.first().map(|s| s.y), Some(0));
        assert_eq!(spans.last().map(|s| s.y), Some(3));
    }

    #[test]
    fn test_interior_grid() {
        let poly = hexagon();
        let grid = poly.interior_grid(1.0).unwrap();
        assert!(grid.iter().all(|p| poly.contains(*p)));
        assert!(grid.contains(&Point::new(5.0, 8.0)));
        assert!(poly.interior_grid(0.0).is_err());
    }

    #[test]
    fn test_circumcircle() {
        let tri = Triangle::new(Point::new(-1.0, 6.0), Point::new(2.0, 0.0), Point::new(-4.0, 9.0));
        let circle = tri.circumcircle().unwrap();
        for v in tri.vertices {
            assert!((circle.center.distance(v) - circle.radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_circumcircle_collinear() {
        let tri = Triangle::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        assert!(tri.circumcircle().is_err());
    }
}
