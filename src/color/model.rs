//! Color model value types
//!
//! Plain serializable representations of a color in each model the crate
//! reports. Conversions between them live in [`super::conversion`].

use std::fmt;

use palette::Lab;
use serde::{Deserialize, Serialize};

use crate::{ExtractionError, Result};

/// 8-bit sRGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// HSL color with every component normalized to [0, 1].
///
/// `h` is a fraction of a full turn. Use [`Hsl::to_degrees_percent`] for
/// display values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: h.rem_euclid(1.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Hue in whole degrees [0, 360), saturation and lightness in whole percent
    pub fn to_degrees_percent(self) -> (u16, u8, u8) {
        let hue = (self.h * 360.0).round() as u16 % 360;
        let saturation = (self.s * 100.0).round() as u8;
        let lightness = (self.l * 100.0).round() as u8;
        (hue, saturation, lightness)
    }
}

/// CMYK color as whole percentages in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    pub const fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Self { c, m, y, k }
    }
}

/// Lab color representation for results, configuration and datasets.
///
/// Uses CIE L*a*b* coordinates relative to D65. Accepts either
/// `{"l":..,"a":..,"b":..}` or a `[l, a, b]` array when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LabRepr")]
pub struct LabColor {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabRepr {
    Object { l: f32, a: f32, b: f32 },
    Array([f32; 3]),
}

impl From<LabRepr> for LabColor {
    fn from(repr: LabRepr) -> Self {
        match repr {
            LabRepr::Object { l, a, b } => LabColor { l, a, b },
            LabRepr::Array([l, a, b]) => LabColor { l, a, b },
        }
    }
}

impl LabColor {
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance in Lab space (CIE76 ΔE)
    pub fn distance(&self, other: &LabColor) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// Round every channel to two decimal places
    pub fn rounded(self) -> Self {
        Self::new(round2(self.l), round2(self.a), round2(self.b))
    }
}

impl From<LabColor> for Lab {
    fn from(color: LabColor) -> Self {
        Lab::new(color.l, color.a, color.b)
    }
}

impl From<Lab> for LabColor {
    fn from(lab: Lab) -> Self {
        LabColor::new(lab.l, lab.a, lab.b)
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Canonical hex color, always stored as lowercase `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hex(String);

impl Hex {
    pub fn from_rgb(rgb: RgbColor) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b))
    }

    /// Parse a hex color string
    ///
    /// Accepts `#rrggbb` or `rrggbb` in either case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless the string holds exactly six hex digits
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ExtractionError::invalid_parameter("hex", input));
        }
        Ok(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    /// The `#rrggbb` form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `rrggbb` form, for consumers that expect no prefix
    pub fn bare(&self) -> &str {
        &self.0[1..]
    }

    pub fn to_rgb(&self) -> RgbColor {
        let digits = self.bare();
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        RgbColor::new(channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Hex {
    type Error = ExtractionError;

    fn try_from(value: String) -> Result<Self> {
        Hex::parse(&value)
    }
}

impl From<Hex> for String {
    fn from(hex: Hex) -> Self {
        hex.0
    }
}

impl From<RgbColor> for Hex {
    fn from(rgb: RgbColor) -> Self {
        Hex::from_rgb(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_from_rgb_is_lowercase_with_prefix() {
        let hex = Hex::from_rgb(RgbColor::new(255, 0, 171));
        assert_eq!(hex.as_str(), "#ff00ab");
        assert_eq!(hex.bare(), "ff00ab");
        assert_eq!(hex.to_string(), "#ff00ab");
    }

    #[test]
    fn test_hex_parse() {
        let with_prefix = Hex::parse("#FF0000").unwrap();
        let without_prefix = Hex::parse("ff0000").unwrap();
        assert_eq!(with_prefix, without_prefix);
        assert_eq!(with_prefix.to_rgb(), RgbColor::new(255, 0, 0));

        assert!(Hex::parse("#FF").is_err());
        assert!(Hex::parse("#GGGGGG").is_err());
        assert!(Hex::parse("#ff00001").is_err());
    }

    #[test]
    fn test_hex_serde_uses_prefixed_string() {
        let hex = Hex::from_rgb(RgbColor::new(0x33, 0x66, 0xcc));
        let json = serde_json::to_string(&hex).unwrap();
        assert_eq!(json, "\"#3366cc\"");

        let parsed: Hex = serde_json::from_str("\"3366CC\"").unwrap();
        assert_eq!(parsed, hex);
        assert!(serde_json::from_str::<Hex>("\"nothex\"").is_err());
    }

    #[test]
    fn test_lab_accepts_object_and_array() {
        let object: LabColor = serde_json::from_str(r#"{"l":50.0,"a":-3.5,"b":12.25}"#).unwrap();
        let array: LabColor = serde_json::from_str("[50.0, -3.5, 12.25]").unwrap();
        assert_eq!(object, array);
    }

    #[test]
    fn test_lab_distance() {
        let a = LabColor::new(50.0, 0.0, 0.0);
        assert_eq!(a.distance(&a), 0.0);

        let c = LabColor::new(90.0, 0.0, 0.0);
        assert!((a.distance(&c) - 40.0).abs() < 1e-4);
        assert_eq!(a.distance(&c), c.distance(&a));
    }

    #[test]
    fn test_lab_rounding() {
        let lab = LabColor::new(53.240_59, 80.092_3, 67.203_2).rounded();
        assert_eq!(lab, LabColor::new(53.24, 80.09, 67.2));
    }

    #[test]
    fn test_hsl_presentation() {
        let hsl = Hsl::new(0.5, 0.25, 0.76);
        assert_eq!(hsl.to_degrees_percent(), (180, 25, 76));

        // A hue of one full turn wraps back to zero
        assert_eq!(Hsl::new(1.0, 0.0, 0.0).to_degrees_percent().0, 0);
        assert_eq!(Hsl::new(0.9999, 1.0, 0.5).to_degrees_percent().0, 0);
    }
}
