//! Color space conversion utilities
//!
//! Pure conversions between the color models reported by the extractor:
//! - RGB to/from CIE Lab (D65), rounded to two decimals
//! - RGB to/from HSL (normalized floats)
//! - RGB to CMYK (subtractive, whole percentages)
//! - Relative luminance and contrast for readable text colors

use palette::{FromColor, Lab, Srgb};

use crate::color::model::{Cmyk, Hex, Hsl, LabColor, RgbColor};

/// Color converter for sRGB input
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// Values are relative to D65 and rounded to two decimal places.
    pub fn rgb_to_lab(&self, rgb: RgbColor) -> LabColor {
        let lab = Lab::from_color(to_srgb(rgb));
        LabColor::from(lab).rounded()
    }

    /// Convert Lab to RGB, clamped to the sRGB gamut
    pub fn lab_to_rgb(&self, lab: LabColor) -> RgbColor {
        let srgb = Srgb::from_color(Lab::from(lab));
        from_srgb(srgb)
    }

    /// Convert RGB to HSL with all components in [0, 1]
    pub fn rgb_to_hsl(&self, rgb: RgbColor) -> Hsl {
        let hsl = palette::Hsl::from_color(to_srgb(rgb));
        Hsl::new(
            hsl.hue.into_positive_degrees() / 360.0,
            hsl.saturation,
            hsl.lightness,
        )
    }

    /// Convert normalized HSL back to RGB
    pub fn hsl_to_rgb(&self, hsl: Hsl) -> RgbColor {
        let color = palette::Hsl::new(hsl.h * 360.0, hsl.s, hsl.l);
        from_srgb(Srgb::from_color(color))
    }

    /// Convert RGB to CMYK percentages
    ///
    /// `K = 1 - max(R,G,B)/255`, `C = (1 - R/255 - K) / (1 - K)` and likewise
    /// for M and Y. Pure black uses a denominator of 1.
    pub fn rgb_to_cmyk(&self, rgb: RgbColor) -> Cmyk {
        let r = f32::from(rgb.r) / 255.0;
        let g = f32::from(rgb.g) / 255.0;
        let b = f32::from(rgb.b) / 255.0;

        let k = 1.0 - r.max(g).max(b);
        let denominator = if k >= 1.0 { 1.0 } else { 1.0 - k };
        let channel = |value: f32| to_percent(((1.0 - value - k) / denominator).max(0.0));

        Cmyk::new(channel(r), channel(g), channel(b), to_percent(k))
    }

    pub fn rgb_to_hex(&self, rgb: RgbColor) -> Hex {
        Hex::from_rgb(rgb)
    }

    /// WCAG relative luminance of an sRGB color
    pub fn relative_luminance(&self, rgb: RgbColor) -> f32 {
        let linear = to_srgb(rgb).into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// WCAG contrast ratio between two colors, in [1, 21]
    pub fn contrast_ratio(&self, first: RgbColor, second: RgbColor) -> f32 {
        let l1 = self.relative_luminance(first);
        let l2 = self.relative_luminance(second);
        let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

fn to_srgb(rgb: RgbColor) -> Srgb {
    Srgb::new(rgb.r, rgb.g, rgb.b).into_format()
}

fn from_srgb(srgb: Srgb) -> RgbColor {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    RgbColor::new(channel(srgb.red), channel(srgb.green), channel(srgb.blue))
}

fn to_percent(fraction: f32) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_lab_black() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::BLACK);
        assert!(lab.l < 1.0);
    }

    #[test]
    fn test_rgb_to_lab_white() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::WHITE);
        assert!(lab.l > 99.0);
        assert!(lab.a.abs() < 1.0);
        assert!(lab.b.abs() < 1.0);
    }

    #[test]
    fn test_rgb_to_lab_red_reference_values() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::new(255, 0, 0));
        // CIE reference for sRGB red under D65
        assert!((lab.l - 53.24).abs() < 0.1, "L was {}", lab.l);
        assert!((lab.a - 80.09).abs() < 0.2, "a was {}", lab.a);
        assert!((lab.b - 67.20).abs() < 0.2, "b was {}", lab.b);
    }

    #[test]
    fn test_rgb_to_lab_is_rounded_to_two_decimals() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::new(12, 200, 77));
        for channel in [lab.l, lab.a, lab.b] {
            let scaled = channel * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-2);
        }
    }

    #[test]
    fn test_lab_roundtrip_within_one_unit() {
        let converter = ColorConverter::new();
        let samples = [
            RgbColor::new(0, 0, 0),
            RgbColor::new(255, 255, 255),
            RgbColor::new(128, 128, 128),
            RgbColor::new(255, 0, 0),
            RgbColor::new(12, 200, 77),
            RgbColor::new(30, 60, 210),
            RgbColor::new(250, 240, 5),
        ];

        for rgb in samples {
            let back = converter.lab_to_rgb(converter.rgb_to_lab(rgb));
            for (original, restored) in rgb.to_array().into_iter().zip(back.to_array()) {
                assert!(
                    (i16::from(original) - i16::from(restored)).abs() <= 1,
                    "{:?} came back as {:?}",
                    rgb,
                    back
                );
            }
        }
    }

    #[test]
    fn test_rgb_to_hsl() {
        let converter = ColorConverter::new();

        let red = converter.rgb_to_hsl(RgbColor::new(255, 0, 0));
        assert!(red.h.abs() < 1e-4);
        assert!((red.s - 1.0).abs() < 1e-4);
        assert!((red.l - 0.5).abs() < 1e-4);

        let blue = converter.rgb_to_hsl(RgbColor::new(0, 0, 255));
        assert_eq!(blue.to_degrees_percent(), (240, 100, 50));

        let gray = converter.rgb_to_hsl(RgbColor::new(128, 128, 128));
        assert!(gray.s.abs() < 1e-4);
        assert_eq!(gray.to_degrees_percent().2, 50);
    }

    #[test]
    fn test_hsl_roundtrip() {
        let converter = ColorConverter::new();
        let rgb = RgbColor::new(30, 60, 210);
        let back = converter.hsl_to_rgb(converter.rgb_to_hsl(rgb));
        assert_eq!(back, rgb);
    }

    #[test]
    fn test_rgb_to_cmyk_black_and_white() {
        let converter = ColorConverter::new();
        assert_eq!(converter.rgb_to_cmyk(RgbColor::BLACK), Cmyk::new(0, 0, 0, 100));
        assert_eq!(converter.rgb_to_cmyk(RgbColor::WHITE), Cmyk::new(0, 0, 0, 0));
    }

    #[test]
    fn test_rgb_to_cmyk_primaries() {
        let converter = ColorConverter::new();
        assert_eq!(converter.rgb_to_cmyk(RgbColor::new(255, 0, 0)), Cmyk::new(0, 100, 100, 0));
        assert_eq!(converter.rgb_to_cmyk(RgbColor::new(0, 255, 255)), Cmyk::new(100, 0, 0, 0));
        assert_eq!(converter.rgb_to_cmyk(RgbColor::new(128, 128, 128)), Cmyk::new(0, 0, 0, 50));
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        let converter = ColorConverter::new();
        let ratio = converter.contrast_ratio(RgbColor::BLACK, RgbColor::WHITE);
        assert!((ratio - 21.0).abs() < 0.01);
        assert_eq!(converter.contrast_ratio(RgbColor::WHITE, RgbColor::BLACK), ratio);
        assert!((converter.contrast_ratio(RgbColor::WHITE, RgbColor::WHITE) - 1.0).abs() < 1e-6);
    }
}
