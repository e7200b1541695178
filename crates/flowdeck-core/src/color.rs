use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Error type for color string parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unsupported color format {0:?} (expected #RGB, #RRGGBB or #RRGGBBAA)")]
    UnsupportedFormat(String),
    #[error("invalid hex digit in color {0:?}")]
    InvalidHexDigit(String),
}

/// An RGBA color.
///
/// Styles cross the model boundary as CSS hex strings ("#E5F5F8"), so the
/// serde form is the hex string rather than a struct. Alpha is omitted from
/// the serialized form when fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse a CSS-style hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(ColorParseError::UnsupportedFormat(hex.to_string()));
        }

        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHexDigit(hex.to_string()))
        };

        match digits.len() {
            3 => {
                // Shorthand: each digit expands to a pair (#abc -> #aabbcc)
                let r = byte(&digits[0..1])?;
                let g = byte(&digits[1..2])?;
                let b = byte(&digits[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
            )),
            8 => Ok(Self::rgba(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(ColorParseError::UnsupportedFormat(hex.to_string())),
        }
    }

    /// Format as a CSS hex string. Opaque colors use the 6-digit form.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Return a darker version of this color (amount in 0.0..=1.0)
    pub fn darken(&self, amount: f32) -> Self {
        let factor = (1.0 - amount).clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * factor) as u8,
            g: (self.g as f32 * factor) as u8,
            b: (self.b as f32 * factor) as u8,
            a: self.a,
        }
    }

    /// Return a lighter version of this color (amount in 0.0..=1.0)
    pub fn lighten(&self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let lift = |c: u8| (c as f32 + (255.0 - c as f32) * amount) as u8;
        Self {
            r: lift(self.r),
            g: lift(self.g),
            b: lift(self.b),
            a: self.a,
        }
    }

    /// Perceived luminance, 0.0 (black) to 255.0 (white).
    pub fn luminance(&self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Whether dark text stays readable on top of this color.
    pub fn is_light(&self) -> bool {
        self.luminance() > 140.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::from_hex(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Color::from_hex("#e5f5f8"), Ok(Color::rgb(229, 245, 248)));
        assert_eq!(Color::from_hex("FF0000"), Ok(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn parses_shorthand_hex() {
        assert_eq!(Color::from_hex("#abc"), Ok(Color::rgb(170, 187, 204)));
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        assert_eq!(
            Color::from_hex("#11223380"),
            Ok(Color::rgba(17, 34, 51, 128))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Color::from_hex("#12345"),
            Err(ColorParseError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Color::from_hex("#zzzzzz"),
            Err(ColorParseError::InvalidHexDigit(_))
        ));
        assert!(matches!(
            Color::from_hex("#ﬀﬀﬀ"),
            Err(ColorParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn serde_uses_the_hex_string_form() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(back, Color::rgb(255, 0, 0));
    }

    #[test]
    fn darken_and_lighten_stay_in_range() {
        let c = Color::rgb(100, 150, 200);
        let darker = c.darken(0.5);
        assert!(darker.r < c.r && darker.g < c.g && darker.b < c.b);
        let lighter = c.lighten(0.5);
        assert!(lighter.r > c.r && lighter.g > c.g && lighter.b > c.b);
        assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
        assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
    }

    #[test]
    fn light_backgrounds_report_light() {
        assert!(Color::rgb(229, 245, 248).is_light());
        assert!(!Color::rgb(30, 30, 46).is_light());
    }

    proptest! {
        /// Property: any color survives a hex round-trip unchanged.
        #[test]
        fn prop_hex_roundtrip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, a in 0u8..=255) {
            let color = Color::rgba(r, g, b, a);
            let parsed = Color::from_hex(&color.to_hex()).unwrap();
            prop_assert_eq!(parsed, color);
        }

        /// Property: arbitrary input never panics, it either parses or errors.
        #[test]
        fn prop_parse_never_panics(input in ".{0,12}") {
            let _ = Color::from_hex(&input);
        }
    }
}
