//! # Trueno-Raster
//!
//! Classic 2D scan-conversion algorithms as pure functions.
//!
//! Every rasterizer takes numeric parameters and returns an owned vector of
//! integer pixel coordinates, or of [`raster::PixelSample`]s when the
//! algorithm produces coverage. A software [`framebuffer::Framebuffer`],
//! a world-to-pixel [`render::Viewport`] and PNG output let the results be
//! inspected as images.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let circle = bresenham_circle(IntPoint::new(0, 0), 10)?;
//! assert!(circle.contains(&IntPoint::new(10, 0)));
//!
//! let line = bresenham_line(IntPoint::new(1, 5), IntPoint::new(2, 8));
//! assert_eq!(line.len(), 4);
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config`: YAML configuration via serde
//! - `cli`: the `trueno-raster` command-line tool (default)
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Pitteway, M. L. V. (1967). "Algorithm for drawing ellipses or hyperbolae with a digital plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Gupta, S., & Sproull, R. F. (1981). "Filtering edges for gray-scale displays." SIGGRAPH '81.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and slice palettes.
pub mod color;

/// Software RGBA framebuffer.
pub mod framebuffer;

/// Geometric primitives (points, pixels, spans, polygons).
pub mod geometry;

/// Linear scales for world-to-pixel mappings.
pub mod scale;

/// Affine transforms of point sets.
pub mod transform;

// ============================================================================
// Algorithm Modules
// ============================================================================

/// Scan-conversion algorithms.
pub mod raster;

/// Pie-chart slice geometry.
pub mod pie;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Viewport mapping and plotting into framebuffers.
pub mod render;

/// Output encoders (PNG).
pub mod output;

/// YAML configuration.
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Hsla, Palette, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Circle, IntPoint, Line, Point, Polygon, Rect, Span, Triangle};
    pub use crate::output::PngEncoder;
    pub use crate::pie::{LabelPlacement, PieChart, PieLayout, PieSlice};
    pub use crate::raster::{
        bresenham_circle, bresenham_line, dda_line, gupta_sproull_line, midpoint_ellipse, midpoint_line,
        midpoint_parabola, wu_line, LineAlgorithm, PixelSample,
    };
    pub use crate::render::{Drawable, Viewport};
    pub use crate::scale::{LinearScale, Scale};
    pub use crate::transform::Affine2D;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
