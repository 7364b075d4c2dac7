//! Density conversion and color helpers.
//!
//! Density is always passed explicitly; nothing here caches process-wide
//! state.

use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Style};
use serde::{Deserialize, Deserializer};

use crate::error::CurveNavError;

// ─── Density ─────────────────────────────────────────────────────────────

/// Pixels per density-independent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f32);

impl Density {
    pub fn new(scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self(scale)
        } else {
            Self(1.0)
        }
    }

    pub fn scale(self) -> f32 {
        self.0
    }

    /// Convert a density-independent size to pixels.
    pub fn dp(self, value: f32) -> f32 {
        value * self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// A packed 0xAARRGGBB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    pub const BLACK: Argb = Argb(0xFF00_0000);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    fn channels(self) -> [u8; 4] {
        [self.alpha(), self.red(), self.green(), self.blue()]
    }

    fn from_channels([a, r, g, b]: [u8; 4]) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Terminal color. Alpha is dropped; terminals have no blending.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.red(), self.green(), self.blue())
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

impl FromStr for Argb {
    type Err = CurveNavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| CurveNavError::InvalidColor(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
    }
}

/// Blend two colors channel by channel, alpha included.
pub fn blend(from: Argb, to: Argb, fraction: f32) -> Argb {
    let t = fraction.clamp(0.0, 1.0);
    let a = from.channels();
    let b = to.channels();
    let mut out = [0u8; 4];
    for i in 0..4 {
        let v = a[i] as f32 + (b[i] as f32 - a[i] as f32) * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    Argb::from_channels(out)
}

/// Single-color style used for both icon and title tinting.
pub fn tint_style(color: Argb) -> Style {
    Style::default().fg(color.to_color())
}

/// Parse a color string.
/// Supports: "#RRGGBB", "#AARRGGBB" and a few named colors.
pub fn parse_color(s: &str) -> Option<Argb> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "transparent" => Some(Argb(0)),
        "black" => Some(Argb::BLACK),
        "white" => Some(Argb::WHITE),
        "red" => Some(Argb::rgb(0xF4, 0x43, 0x36)),
        "green" => Some(Argb::rgb(0x4C, 0xAF, 0x50)),
        "blue" => Some(Argb::rgb(0x21, 0x96, 0xF3)),
        "orange" => Some(Argb::rgb(0xEF, 0x6C, 0x00)),
        "teal" => Some(Argb::rgb(0x00, 0x95, 0xB9)),
        "gray" | "grey" => Some(Argb::rgb(0x9E, 0x9E, 0x9E)),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Argb::rgb(0x21, 0x21, 0x21)),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let rgb = u32::from_str_radix(&hex[1..], 16).ok()?;
            Some(Argb(0xFF00_0000 | rgb))
        }
        hex if hex.starts_with('#') && hex.len() == 9 => {
            u32::from_str_radix(&hex[1..], 16).ok().map(Argb)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_scales_sizes() {
        let d = Density::new(2.5);
        assert!((d.dp(24.0) - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn density_rejects_nonsense_scale() {
        assert_eq!(Density::new(0.0).scale(), 1.0);
        assert_eq!(Density::new(f32::NAN).scale(), 1.0);
    }

    #[test]
    fn parses_hex_with_and_without_alpha() {
        assert_eq!(parse_color("#0095B9"), Some(Argb(0xFF00_95B9)));
        assert_eq!(parse_color("#5f212121"), Some(Argb(0x5F21_2121)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn blend_hits_endpoints_and_midpoint() {
        let from = Argb::rgb(0, 0, 0);
        let to = Argb::rgb(200, 100, 50);
        assert_eq!(blend(from, to, 0.0), from);
        assert_eq!(blend(from, to, 1.0), to);
        assert_eq!(blend(from, to, 0.5), Argb::rgb(100, 50, 25));
        assert_eq!(blend(from, to, 7.0), to);
    }

    #[test]
    fn terminal_color_drops_alpha() {
        assert_eq!(Argb(0x5F21_2121).to_color(), Color::Rgb(0x21, 0x21, 0x21));
    }
}
