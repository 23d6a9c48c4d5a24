//! 2D affine transforms of point sets.
//!
//! The free functions map a slice of points to a new vector of the same
//! length and order. [`Affine2D`] expresses the same operations as a matrix
//! so chains such as "translate, then rotate about the new centre" can be
//! built once and applied to many points.

use crate::geometry::Point;

/// A 2D affine transform
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
///
/// mapping `(x, y)` to `(a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2D {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    /// Uniform scale about the origin.
    #[must_use]
    pub const fn scale(factor: f32) -> Self {
        Self { a: factor, d: factor, ..Self::IDENTITY }
    }

    /// Independent scale factors along x and y about the origin.
    #[must_use]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Uniform scale about `center`.
    #[must_use]
    pub fn scale_about(center: Point, factor: f32) -> Self {
        Self::translate(-center.x, -center.y)
            .then(&Self::scale(factor))
            .then(&Self::translate(center.x, center.y))
    }

    /// Translation by `(dx, dy)`.
    #[must_use]
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self { tx: dx, ty: dy, ..Self::IDENTITY }
    }

    /// Counter-clockwise rotation by `degrees` about `center`.
    #[must_use]
    pub fn rotate(center: Point, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        // x' = cx + (x - cx)cos - (y - cy)sin
        // y' = cy + (x - cx)sin + (y - cy)cos
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: center.x - center.x * cos + center.y * sin,
            ty: center.y - center.x * sin - center.y * cos,
        }
    }

    /// The transform that applies `self` first and `next` second.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    /// Transform one point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.tx, self.b * p.x + self.d * p.y + self.ty)
    }

    /// Transform every point, preserving order.
    #[must_use]
    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

/// Scale every point by `factor` about the origin.
#[must_use]
pub fn scale(points: &[Point], factor: f32) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x * factor, p.y * factor)).collect()
}

/// Scale every point by `factor` about `center`.
#[must_use]
pub fn scale_about(points: &[Point], center: Point, factor: f32) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(center.x + (p.x - center.x) * factor, center.y + (p.y - center.y) * factor))
        .collect()
}

/// Translate every point by `(dx, dy)`.
#[must_use]
pub fn translate(points: &[Point], dx: f32, dy: f32) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect()
}

/// Rotate every point counter-clockwise by `degrees` about `center`.
#[must_use]
pub fn rotate(points: &[Point], center: Point, degrees: f32) -> Vec<Point> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    points
        .iter()
        .map(|p| {
            let (rx, ry) = (p.x - center.x, p.y - center.y);
            Point::new(center.x + rx * cos - ry * sin, center.y + rx * sin + ry * cos)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Vec<Point> {
        vec![Point::new(0.0, 4.0), Point::new(4.0, 4.0), Point::new(4.0, 0.0), Point::new(0.0, 0.0)]
    }

    fn assert_points_eq(a: &[Point], b: &[Point], eps: f32) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert_abs_diff_eq!(p.x, q.x, epsilon = eps);
            assert_abs_diff_eq!(p.y, q.y, epsilon = eps);
        }
    }

    #[test]
    fn test_scale() {
        let scaled = scale(&square(), 2.0);
        assert_eq!(scaled[1], Point::new(8.0, 8.0));
        assert_eq!(scaled.len(), 4);
    }

    #[test]
    fn test_translate() {
        let moved = translate(&square(), 2.0, 2.0);
        assert_eq!(moved[3], Point::new(2.0, 2.0));
        assert_eq!(moved[1], Point::new(6.0, 6.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate(&[Point::new(1.0, 0.0)], Point::ORIGIN, 90.0);
        assert_abs_diff_eq!(rotated[0].x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rotated[0].y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_about_center_keeps_center() {
        let center = Point::new(4.0, 4.0);
        let rotated = rotate(&[center], center, 37.0);
        assert_points_eq(&rotated, &[center], 1e-5);
    }

    #[test]
    fn test_affine_matches_free_functions() {
        let pts = square();
        let center = Point::new(1.5, -2.0);
        assert_points_eq(&Affine2D::rotate(center, 30.0).apply_all(&pts), &rotate(&pts, center, 30.0), 1e-4);
        assert_points_eq(&Affine2D::scale(3.0).apply_all(&pts), &scale(&pts, 3.0), 1e-5);
        assert_points_eq(
            &Affine2D::scale_about(center, 0.5).apply_all(&pts),
            &scale_about(&pts, center, 0.5),
            1e-5,
        );
        assert_points_eq(&Affine2D::translate(1.0, -1.0).apply_all(&pts), &translate(&pts, 1.0, -1.0), 1e-6);
    }

    #[test]
    fn test_then_order() {
        // Translate by (2, 2), then rotate 45 degrees about the new centre.
        let pts = square();
        let chained = Affine2D::translate(2.0, 2.0).then(&Affine2D::rotate(Point::new(4.0, 4.0), 45.0));
        let stepwise = rotate(&translate(&pts, 2.0, 2.0), Point::new(4.0, 4.0), 45.0);
        assert_points_eq(&chained.apply_all(&pts), &stepwise, 1e-4);
    }

    #[test]
    fn test_identity_default() {
        let p = Point::new(3.0, -7.0);
        assert_eq!(Affine2D::default().apply(p), p);
    }
}
