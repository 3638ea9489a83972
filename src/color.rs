//! Color specifications and resolution.
//!
//! Callers describe colors as a name, a hex string, or an explicit RGB
//! triple; everything is resolved to normalized `[0, 1]` components before
//! any operator is emitted.

use crate::error::{Error, Result};

/// Fixed table of recognized color names. Lookup is case-insensitive
/// (names are lowercased before the probe).
static COLOR_NAMES: phf::Map<&'static str, (u8, u8, u8)> = phf::phf_map! {
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "red" => (255, 0, 0),
    "green" => (0, 128, 0),
    "blue" => (0, 0, 255),
    "yellow" => (255, 255, 0),
    "cyan" => (0, 255, 255),
    "magenta" => (255, 0, 255),
    "gray" => (128, 128, 128),
    "orange" => (255, 165, 0),
    "purple" => (128, 0, 128),
    "pink" => (255, 192, 203),
    "brown" => (139, 69, 19),
    "navy" => (0, 0, 128),
    "teal" => (0, 128, 128),
    "olive" => (128, 128, 0),
    "maroon" => (128, 0, 0),
    "gold" => (255, 215, 0),
    "lime" => (0, 255, 0),
};

/// RGB color with normalized components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color from normalized components.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// A color as supplied by the caller, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// A name from the fixed color table, matched case-insensitively.
    Named(String),
    /// A 3- or 6-digit hex string, with or without a leading `#`.
    Hex(String),
    /// An explicit 8-bit RGB triple.
    Rgb(u8, u8, u8),
}

impl ColorSpec {
    /// Resolve this specification to normalized components.
    ///
    /// Fails with [`Error::InvalidColor`] for an unknown name or a hex
    /// string that is not 3 or 6 digits after prefix removal.
    pub fn resolve(&self) -> Result<Color> {
        match self {
            ColorSpec::Named(name) => {
                let key = name.trim().to_ascii_lowercase();
                COLOR_NAMES
                    .get(key.as_str())
                    .map(|&(r, g, b)| Color::from_rgb8(r, g, b))
                    .ok_or_else(|| Error::InvalidColor(name.clone()))
            },
            ColorSpec::Hex(hex) => parse_hex(hex),
            ColorSpec::Rgb(r, g, b) => Ok(Color::from_rgb8(*r, *g, *b)),
        }
    }
}

impl From<&str> for ColorSpec {
    /// Strings starting with `#` are hex specs, everything else is a name.
    fn from(s: &str) -> Self {
        if s.trim().starts_with('#') {
            ColorSpec::Hex(s.to_string())
        } else {
            ColorSpec::Named(s.to_string())
        }
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorSpec::Rgb(r, g, b)
    }
}

/// Parse a hex color string like `#FF0000` or `F00`.
fn parse_hex(hex: &str) -> Result<Color> {
    let digits = hex.trim().trim_start_matches('#');

    // Expand 3-digit shorthand by doubling each digit.
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    if expanded.len() != 6 || !expanded.is_ascii() {
        return Err(Error::InvalidColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16)
            .map_err(|_| Error::InvalidColor(hex.to_string()))
    };

    Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
