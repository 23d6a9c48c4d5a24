//! Color types and slice palettes.
//!
//! [`Rgba`] is the framebuffer pixel format. [`Palette`] generates the
//! grayscale and categorical fills used for pie slices.

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);
    /// Opaque orange (#FFA500).
    pub const ORANGE: Self = Self::new(255, 165, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque gray with all channels set to `level`.
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Multiply alpha by a coverage value in `[0, 1]`.
    #[must_use]
    pub fn with_coverage(self, coverage: f32) -> Self {
        let coverage = coverage.clamp(0.0, 1.0);
        self.with_alpha((f32::from(self.a) * coverage).round() as u8)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other form.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Format as `#RRGGBBAA`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b), mix(self.a, other.a))
    }
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let second = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, second, 0.0),
            1 => (second, chroma, 0.0),
            2 => (0.0, chroma, second),
            3 => (0.0, second, chroma),
            4 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };
        let m = self.l - chroma / 2.0;
        let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::new(to_u8(r), to_u8(g), to_u8(b), (self.a.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Fill color generators for charts.
pub struct Palette;

impl Palette {
    /// `n` opaque grays from dark to light, avoiding pure black and white
    /// so slices stay distinguishable from background and outline.
    #[must_use]
    pub fn grayscale(n: usize) -> Vec<Rgba> {
        (0..n)
            .map(|i| {
                let t = (i as f32 + 1.0) / (n as f32 + 1.0);
                Rgba::gray((t * 255.0).round() as u8)
            })
            .collect()
    }

    /// `n` opaque colors with hues evenly spaced around the wheel.
    #[must_use]
    pub fn categorical(n: usize) -> Vec<Rgba> {
        (0..n).map(|i| Hsla::hsl(360.0 * i as f32 / n.max(1) as f32, 0.65, 0.5).to_rgba()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::gray(255));
        assert_eq!(Rgba::ORANGE, Rgba::from_hex("#FFA500").unwrap());
    }

    #[test]
    fn test_with_coverage() {
        assert_eq!(Rgba::RED.with_coverage(0.5).a, 128);
        assert_eq!(Rgba::RED.with_coverage(0.0).a, 0);
        assert_eq!(Rgba::RED.with_coverage(2.0).a, 255);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("00ff00").unwrap(), Rgba::GREEN);
        assert_eq!(Rgba::from_hex("#10203040").unwrap(), Rgba::new(0x10, 0x20, 0x30, 0x40));
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Rgba::new(1, 2, 254, 128);
        assert_eq!(Rgba::from_hex(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 1.5), Rgba::WHITE);
    }

    #[test]
    fn test_hsla_primaries() {
        assert_eq!(Hsla::hsl(0.0, 1.0, 0.5).to_rgba(), Rgba::RED);
        assert_eq!(Hsla::hsl(120.0, 1.0, 0.5).to_rgba(), Rgba::GREEN);
        assert_eq!(Hsla::hsl(240.0, 1.0, 0.5).to_rgba(), Rgba::BLUE);
        assert_eq!(Hsla::hsl(0.0, 0.0, 1.0).to_rgba(), Rgba::WHITE);
    }

    #[test]
    fn test_grayscale_palette() {
        let shades = Palette::grayscale(6);
        assert_eq!(shades.len(), 6);
        assert!(shades.windows(2).all(|w| w[0].r < w[1].r));
        assert!(shades.iter().all(|c| c.r == c.g && c.g == c.b && c.r > 0 && c.r < 255));
    }

    #[test]
    fn test_categorical_palette_distinct() {
        let colors = Palette::categorical(6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(Palette::categorical(0).is_empty());
    }
}
