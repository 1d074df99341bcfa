//! Character and block formatting attributes.
//!
//! [`CharFormat`] and [`BlockFormat`] are the complete formats stored in a
//! document. [`CharFormatDelta`] and [`BlockFormatDelta`] are sparse
//! overrides: only the fields that are `Some` are written when a delta is
//! merged, so merging the same delta twice leaves the same state as merging
//! it once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque RGBA color with 8 bits per channel.
///
/// Serialized as a `#RRGGBB` or `#RRGGBBAA` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    pub const RED: Self = Self::from_rgb8(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb8(0, 128, 0);
    pub const BLUE: Self = Self::from_rgb8(0, 0, 255);
    pub const YELLOW: Self = Self::from_rgb8(255, 255, 0);
    pub const GRAY: Self = Self::from_rgb8(128, 128, 128);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Character-level formatting attributes.
///
/// `None` fields inherit the editor defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharFormat {
    /// Font family display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Text color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    /// Highlight color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl CharFormat {
    /// Create a new default (unstyled) format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this format has any styling applied.
    pub fn is_styled(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.strikethrough
            || self.foreground.is_some()
            || self.background.is_some()
            || self.font_family.is_some()
            || self.font_size.is_some()
    }

    /// Create a bold format.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    /// Create an italic format.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    /// Return a copy with `delta` merged in.
    pub fn merged(&self, delta: &CharFormatDelta) -> Self {
        let mut format = self.clone();
        delta.apply_to(&mut format);
        format
    }
}

/// Paragraph/block-level formatting attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockFormat {
    pub alignment: Alignment,
    /// Left indentation in layout units.
    pub indent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl BlockFormat {
    /// Create a new default block format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this format has any non-default styling.
    pub fn is_styled(&self) -> bool {
        *self != Self::default()
    }

    /// Builder method to set alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder method to set the indent.
    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = indent;
        self
    }

    /// Return a copy with `delta` merged in.
    pub fn merged(&self, delta: &BlockFormatDelta) -> Self {
        let mut format = self.clone();
        delta.apply_to(&mut format);
        format
    }
}

/// A sparse set of character format overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharFormatDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl CharFormatDelta {
    /// Create an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// A delta that sets every attribute `format` carries.
    ///
    /// Unset font and color fields stay unset in the delta, so merging it
    /// does not clear them on the target.
    pub fn from_format(format: &CharFormat) -> Self {
        Self {
            font_family: format.font_family.clone(),
            font_size: format.font_size,
            bold: Some(format.bold),
            italic: Some(format.italic),
            underline: Some(format.underline),
            strikethrough: Some(format.strikethrough),
            foreground: format.foreground,
            background: format.background,
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = Some(strikethrough);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Check whether the delta sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the set fields into `format`.
    pub fn apply_to(&self, format: &mut CharFormat) {
        if let Some(family) = &self.font_family {
            format.font_family = Some(family.clone());
        }
        if let Some(size) = self.font_size {
            format.font_size = Some(size);
        }
        if let Some(bold) = self.bold {
            format.bold = bold;
        }
        if let Some(italic) = self.italic {
            format.italic = italic;
        }
        if let Some(underline) = self.underline {
            format.underline = underline;
        }
        if let Some(strikethrough) = self.strikethrough {
            format.strikethrough = strikethrough;
        }
        if let Some(color) = self.foreground {
            format.foreground = Some(color);
        }
        if let Some(color) = self.background {
            format.background = Some(color);
        }
    }
}

/// A sparse set of block format overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockFormatDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl BlockFormatDelta {
    /// Create an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// A delta that sets every attribute `format` carries.
    pub fn from_format(format: &BlockFormat) -> Self {
        Self {
            alignment: Some(format.alignment),
            indent: Some(format.indent),
            foreground: format.foreground,
            background: format.background,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Check whether the delta sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the set fields into `format`.
    pub fn apply_to(&self, format: &mut BlockFormat) {
        if let Some(alignment) = self.alignment {
            format.alignment = alignment;
        }
        if let Some(indent) = self.indent {
            format.indent = indent;
        }
        if let Some(color) = self.foreground {
            format.foreground = Some(color);
        }
        if let Some(color) = self.background {
            format.background = Some(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#FF8000"), Some(Color::from_rgb8(255, 128, 0)));
        assert_eq!(
            Color::from_hex("00000080"),
            Some(Color::from_rgba8(0, 0, 0, 128))
        );
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);

        assert_eq!(Color::from_rgb8(255, 128, 0).to_hex(), "#FF8000");
        assert_eq!(Color::from_rgba8(0, 0, 0, 128).to_hex(), "#00000080");
    }

    #[test]
    fn test_color_serde_as_hex() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let parsed: Color = serde_json::from_str("\"#0000FF\"").unwrap();
        assert_eq!(parsed, Color::BLUE);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn test_char_delta_only_touches_set_fields() {
        let base = CharFormat {
            italic: true,
            font_size: Some(11.0),
            ..CharFormat::default()
        };
        let merged = base.merged(&CharFormatDelta::new().with_bold(true));

        assert!(merged.bold);
        assert!(merged.italic);
        assert_eq!(merged.font_size, Some(11.0));
    }

    #[test]
    fn test_delta_is_idempotent() {
        let delta = CharFormatDelta::new()
            .with_font_family("Serif")
            .with_foreground(Color::RED)
            .with_underline(true);
        let once = CharFormat::default().merged(&delta);
        let twice = once.merged(&delta);
        assert_eq!(once, twice);

        let block_delta = BlockFormatDelta::new().with_indent(48);
        let once = BlockFormat::default().merged(&block_delta);
        assert_eq!(once.merged(&block_delta), once);
    }

    #[test]
    fn test_is_styled() {
        assert!(!CharFormat::new().is_styled());
        assert!(CharFormat::bold().is_styled());
        assert!(!BlockFormat::new().is_styled());
        assert!(BlockFormat::new().with_indent(48).is_styled());
        assert!(BlockFormat::new()
            .with_alignment(Alignment::Center)
            .is_styled());
    }
}
