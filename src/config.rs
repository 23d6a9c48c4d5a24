//! YAML configuration for rendering and chart layout.
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```yaml
//! version: 1
//! render:
//!   width: 800
//!   height: 800
//!   background: "#FFFFFF"
//! pie:
//!   label_offset: 0.15
//!   overrides:
//!     2: { radius_offset: 0.1 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::pie::{LabelPlacement, PieLayout};

/// Framebuffer and plot styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Framebuffer width in pixels.
    #[serde(default = "default_size")]
    pub width: u32,

    /// Framebuffer height in pixels.
    #[serde(default = "default_size")]
    pub height: u32,

    /// Side of the square painted for each world pixel.
    #[serde(default = "default_point_size")]
    pub point_size: f32,

    /// World units added around the plotted shape.
    #[serde(default = "default_padding")]
    pub padding: f32,

    /// World units between axis ticks.
    #[serde(default = "default_tick_spacing")]
    pub tick_spacing: f32,

    /// Background color as `#RRGGBB[AA]`.
    #[serde(default = "default_background")]
    pub background: String,

    /// Shape color.
    #[serde(default = "default_foreground")]
    pub foreground: String,

    /// Axis color.
    #[serde(default = "default_axes")]
    pub axes: String,
}

fn default_size() -> u32 {
    500
}
fn default_point_size() -> f32 {
    2.0
}
fn default_padding() -> f32 {
    2.0
}
fn default_tick_spacing() -> f32 {
    5.0
}
fn default_background() -> String {
    "#FFFFFF".to_string()
}
fn default_foreground() -> String {
    "#000000".to_string()
}
fn default_axes() -> String {
    "#A0A0A0".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            point_size: default_point_size(),
            padding: default_padding(),
            tick_spacing: default_tick_spacing(),
            background: default_background(),
            foreground: default_foreground(),
            axes: default_axes(),
        }
    }
}

impl RenderConfig {
    /// Parsed background color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a malformed hex string.
    pub fn background_color(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.background)
    }

    /// Parsed foreground color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a malformed hex string.
    pub fn foreground_color(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.foreground)
    }

    /// Parsed axis color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a malformed hex string.
    pub fn axes_color(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.axes)
    }
}

/// Line rasterizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Gupta-Sproull line width in world pixels.
    #[serde(default = "default_line_width")]
    pub width: f32,
}

fn default_line_width() -> f32 {
    2.0
}

impl Default for LineConfig {
    fn default() -> Self {
        Self { width: default_line_width() }
    }
}

/// Arc tessellation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcConfig {
    /// Maximum chord-to-arc distance in world units.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

fn default_tolerance() -> f32 {
    0.001
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self { tolerance: default_tolerance() }
    }
}

/// Slice fill scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// Evenly spaced hues.
    #[default]
    Categorical,
    /// Dark to light grays.
    Grayscale,
}

impl PaletteKind {
    /// `n` fill colors in this scheme.
    #[must_use]
    pub fn colors(self, n: usize) -> Vec<Rgba> {
        match self {
            Self::Categorical => Palette::categorical(n),
            Self::Grayscale => Palette::grayscale(n),
        }
    }
}

/// Pie-chart layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieConfig {
    /// Angle of the first slice, in degrees.
    #[serde(default)]
    pub start_deg: f32,

    /// Distance of labels beyond the rim.
    #[serde(default = "default_label_offset")]
    pub label_offset: f32,

    /// Fill scheme.
    #[serde(default)]
    pub palette: PaletteKind,

    /// Label overrides keyed by slice index.
    #[serde(default)]
    pub overrides: BTreeMap<usize, LabelPlacement>,
}

fn default_label_offset() -> f32 {
    0.15
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            start_deg: 0.0,
            label_offset: default_label_offset(),
            palette: PaletteKind::default(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Rendering settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Line settings.
    #[serde(default)]
    pub line: LineConfig,

    /// Arc settings.
    #[serde(default)]
    pub arc: ArcConfig,

    /// Pie-chart settings.
    #[serde(default)]
    pub pie: PieConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            render: RenderConfig::default(),
            line: LineConfig::default(),
            arc: ArcConfig::default(),
            pie: PieConfig::default(),
        }
    }
}

impl RasterConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration, falling back to defaults when the file is
    /// missing or malformed.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::ConfigNotFound(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Pie layout built from the `pie` and `arc` sections.
    #[must_use]
    pub fn pie_layout(&self) -> PieLayout {
        PieLayout {
            start_deg: self.pie.start_deg,
            label_offset: self.pie.label_offset,
            tolerance: self.arc.tolerance,
            overrides: self.pie.overrides.clone(),
        }
    }
}
