//! Plotting of rasterizer output.
//!
//! A [`Viewport`] maps the y-up world grid onto a y-down [`Framebuffer`];
//! the primitives below paint points, coverage samples, outlines, scanline
//! fills and axes through it.
//!
//! [`Framebuffer`]: crate::framebuffer::Framebuffer

mod primitives;
mod viewport;

pub use primitives::{
    draw_axes, draw_polyline, draw_segment, fill_polygon, plot_point, plot_points, plot_samples,
    Drawable,
};
pub use viewport::Viewport;
