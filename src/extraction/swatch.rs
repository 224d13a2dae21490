//! Weighted palette entries

use serde::{Deserialize, Serialize};

use crate::color::{ColorConverter, Hex, RgbColor};
use crate::constants::palette::{MIN_BODY_TEXT_CONTRAST, MIN_TITLE_TEXT_CONTRAST};

/// One color of an extracted palette, with its pixel population and the
/// text colors that stay readable on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    pub rgb: RgbColor,
    pub hex: Hex,
    pub population: u32,
    pub title_text_color: Hex,
    pub body_text_color: Hex,
}

impl Swatch {
    pub fn new(rgb: RgbColor, population: u32) -> Self {
        Self {
            rgb,
            hex: Hex::from_rgb(rgb),
            population,
            title_text_color: Hex::from_rgb(readable_text_color(rgb, MIN_TITLE_TEXT_CONTRAST)),
            body_text_color: Hex::from_rgb(readable_text_color(rgb, MIN_BODY_TEXT_CONTRAST)),
        }
    }

    /// Share of `total` pixels this swatch covers, in percent
    pub fn share_of(&self, total: u64) -> f32 {
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.population) / total as f64 * 100.0) as f32
    }
}

/// White if it reaches `min_contrast` against `background`, else black if
/// that does, else whichever of the two contrasts more.
fn readable_text_color(background: RgbColor, min_contrast: f32) -> RgbColor {
    let converter = ColorConverter::new();
    let on_white = converter.contrast_ratio(RgbColor::WHITE, background);
    if on_white >= min_contrast {
        return RgbColor::WHITE;
    }
    let on_black = converter.contrast_ratio(RgbColor::BLACK, background);
    if on_black >= min_contrast || on_black > on_white {
        RgbColor::BLACK
    } else {
        RgbColor::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_colors_on_dark_and_light() {
        let navy = Swatch::new(RgbColor::new(10, 20, 80), 5);
        assert_eq!(navy.body_text_color.as_str(), "#ffffff");
        assert_eq!(navy.title_text_color.as_str(), "#ffffff");

        let cream = Swatch::new(RgbColor::new(250, 245, 220), 5);
        assert_eq!(cream.body_text_color.as_str(), "#000000");
        assert_eq!(cream.title_text_color.as_str(), "#000000");
    }

    #[test]
    fn test_title_threshold_is_looser_than_body() {
        // Mid orange: white passes the 3.0 title threshold but not 4.5 body
        let orange = Swatch::new(RgbColor::new(230, 90, 0), 1);
        let converter = ColorConverter::new();
        let on_white = converter.contrast_ratio(RgbColor::WHITE, orange.rgb);
        assert!(on_white >= 3.0 && on_white < 4.5, "contrast was {}", on_white);
        assert_eq!(orange.title_text_color.as_str(), "#ffffff");
        assert_eq!(orange.body_text_color.as_str(), "#000000");
    }

    #[test]
    fn test_share_of() {
        let swatch = Swatch::new(RgbColor::BLACK, 25);
        assert!((swatch.share_of(100) - 25.0).abs() < 1e-6);
        assert_eq!(swatch.share_of(0), 0.0);
    }

    #[test]
    fn test_swatch_serializes_camel_case() {
        let json = serde_json::to_value(Swatch::new(RgbColor::new(255, 0, 0), 3)).unwrap();
        assert_eq!(json["hex"], "#ff0000");
        assert_eq!(json["population"], 3);
        assert!(json.get("titleTextColor").is_some());
        assert!(json.get("bodyTextColor").is_some());
    }
}
