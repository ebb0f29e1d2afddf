//! Foundational color type used by the widget configuration and draw program.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Error parsing a color string from the settings store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unrecognized color name: {0}")]
    UnknownName(String),
    #[error("malformed hex color: {0}")]
    MalformedHex(String),
}

/// Named colors accepted in settings values, matching the defaults the
/// widget ships with. Keys are lowercased with spaces removed.
static NAMED_COLORS: Lazy<HashMap<&'static str, (u8, u8, u8)>> = Lazy::new(|| {
    HashMap::from([
        ("black", (0, 0, 0)),
        ("white", (255, 255, 255)),
        ("red", (255, 0, 0)),
        ("green", (0, 128, 0)),
        ("blue", (0, 0, 255)),
        ("yellow", (255, 255, 0)),
        ("orange", (255, 165, 0)),
        ("gray", (128, 128, 128)),
        ("grey", (128, 128, 128)),
        ("darkgray", (169, 169, 169)),
        ("darkgrey", (169, 169, 169)),
        ("lightgray", (211, 211, 211)),
        ("lightgrey", (211, 211, 211)),
    ])
});

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Parse a settings color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, and `#rrrrggggbbbb` hex forms plus the
    /// named colors from [`NAMED_COLORS`]. Alpha is always opaque; the
    /// settings store has no alpha channel.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| ColorParseError::MalformedHex(s.to_string()));
        }
        let key: String = s.to_lowercase().split_whitespace().collect();
        match NAMED_COLORS.get(key.as_str()) {
            Some(&(r, g, b)) => Ok(Self::from_rgba8(r, g, b, 255)),
            None => Err(ColorParseError::UnknownName(s.to_string())),
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |chunk: &str| u16::from_str_radix(chunk, 16).ok();
        match hex.len() {
            3 => {
                // 4 bits per channel, replicated (0xf -> 0xff)
                let r = channel(&hex[0..1])? as u8 * 17;
                let g = channel(&hex[1..2])? as u8 * 17;
                let b = channel(&hex[2..3])? as u8 * 17;
                Some(Self::from_rgba8(r, g, b, 255))
            }
            6 => {
                let r = channel(&hex[0..2])? as u8;
                let g = channel(&hex[2..4])? as u8;
                let b = channel(&hex[4..6])? as u8;
                Some(Self::from_rgba8(r, g, b, 255))
            }
            12 => {
                // 16 bits per channel; keep the high byte
                let r = (channel(&hex[0..4])? >> 8) as u8;
                let g = (channel(&hex[4..8])? >> 8) as u8;
                let b = (channel(&hex[8..12])? >> 8) as u8;
                Some(Self::from_rgba8(r, g, b, 255))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb` for writing back to the settings store.
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}
