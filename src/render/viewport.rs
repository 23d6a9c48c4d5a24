//! World-to-framebuffer coordinate mapping.

use crate::error::{Error, Result};
use crate::geometry::{IntPoint, Point, Rect};
use crate::scale::{LinearScale, Scale};
use crate::transform::Affine2D;

/// Maps a y-up world rectangle onto a y-down framebuffer.
///
/// World `(x_min, y_max)` lands on pixel `(0, 0)` and `(x_max, y_min)` on
/// `(width - 1, height - 1)`, like an orthographic projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    world: Rect,
    width: u32,
    height: u32,
    x: LinearScale,
    y: LinearScale,
}

impl Viewport {
    /// Create a viewport showing `world` on a `width` x `height` framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or a degenerate world rectangle.
    pub fn new(world: Rect, width: u32, height: u32) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let x = LinearScale::new((world.x, world.max_x()), (0.0, (width - 1) as f32))?;
        let y = LinearScale::new((world.y, world.max_y()), ((height - 1) as f32, 0.0))?;
        Ok(Self { world, width, height, x, y })
    }

    /// Smallest viewport around `bounds` plus `padding` world units on every
    /// side that keeps world units square on screen.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Viewport::new`].
    pub fn fit(bounds: Rect, width: u32, height: u32, padding: f32) -> Result<Self> {
        let padded = bounds.inflate(padding.max(0.0));
        // Avoid an empty domain for a single point or an axis-aligned segment.
        let w = padded.width.max(1.0);
        let h = padded.height.max(1.0);

        let aspect = width as f32 / height.max(1) as f32;
        let (w, h) = if w / h > aspect { (w, w / aspect) } else { (h * aspect, h) };

        let center = padded.center();
        Self::new(Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h), width, height)
    }

    /// The visible world rectangle.
    #[must_use]
    pub const fn world(&self) -> Rect {
        self.world
    }

    /// Framebuffer dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Map a world point to continuous framebuffer coordinates.
    #[must_use]
    pub fn project(&self, p: Point) -> Point {
        Point::new(self.x.scale(p.x), self.y.scale(p.y))
    }

    /// The world-to-framebuffer mapping as an affine transform, for
    /// projecting whole shapes such as polygons.
    #[must_use]
    pub fn transform(&self) -> Affine2D {
        Affine2D::translate(-self.world.x, -self.world.y)
            .then(&Affine2D::scale_xy(self.x.factor(), self.y.factor()))
            .then(&Affine2D::translate(0.0, (self.height - 1) as f32))
    }

    /// Map a world point to the nearest framebuffer pixel.
    #[must_use]
    pub fn to_pixel(&self, p: Point) -> IntPoint {
        self.project(p).round()
    }

    /// Map a framebuffer pixel back to world coordinates.
    #[must_use]
    pub fn to_world(&self, p: IntPoint) -> Point {
        Point::new(self.x.invert(p.x as f32), self.y.invert(p.y as f32))
    }

    /// Framebuffer pixels per world unit along x.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f32 {
        self.x.factor().abs()
    }
}
