//! Serde helpers storing a [Color] as a `#rrggbb` / `#rrggbbaa` hex string.

use serde::{Deserialize, Deserializer, Serializer};
use vello::peniko::Color;

/// Serialize a Color as a hex string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex(color))
}

/// Deserialize a Color from a hex string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let hex = String::deserialize(deserializer)?;
    parse_hex(&hex).map_err(Error::custom)
}

/// Format a color as hex, omitting alpha when opaque.
pub fn to_hex(color: &Color) -> String {
    let [r, g, b, a] = color.components.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` string.
pub fn parse_hex(hex: &str) -> Result<Color, String> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return Err(format!("Hex color must be 6 or 8 characters, got '{}'", hex));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("Invalid hex color '{}'", hex))
    };

    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba8(r, g, b, a))
}
