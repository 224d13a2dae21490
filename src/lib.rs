//! # Lens Colors
//!
//! A Rust crate for finding the dominant colors of an image and matching
//! them against a catalog of reference colors.
//!
//! This library provides:
//! - Dominant color extraction with a median cut palette strategy and a
//!   histogram fallback that adapts its quantization to fragmented images
//! - Every color expressed as hex, RGB, HSL, CMYK and CIE Lab
//! - Perceptual similarity search in Lab space with a caller tolerance
//! - Batch processing that keeps going when individual images fail
//!
//! ## Example
//!
//! ```rust,no_run
//! use lens_colors::{extract_dominant_color, search, ReferenceSet};
//! use std::path::Path;
//!
//! let dominant = extract_dominant_color(Path::new("photo.jpg"))?;
//! println!("Dominant: {} ({:.1}%)", dominant.hex, dominant.percentage);
//!
//! let catalog = ReferenceSet::from_json_file(Path::new("catalog.json"))?;
//! for hit in search(dominant.lab, catalog.records(), 20.0) {
//!     println!("{}: ΔE {:.2}", hit.record.lot_no, hit.similarity);
//! }
//! # Ok::<(), lens_colors::ExtractionError>(())
//! ```

use std::path::Path;

pub mod batch;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;
pub mod image_loader;
pub mod matching;

pub use batch::{BatchProcessor, BatchReport, ImageSource};
pub use color::{Cmyk, ColorConverter, Hex, Hsl, LabColor, RgbColor};
pub use config::{BatchConfig, ExtractionConfig, MatchingConfig, PaletteOptions, PipelineConfig};
pub use error::{ExtractionError, Result};
pub use extraction::{
    ColorExtractor, DominantColorInfo, ExtractedColors, ExtractionStrategy, HistogramStrategy,
    PaletteStrategy, Swatch,
};
pub use matching::{match_percent, search, MatchResult, ReferenceColorRecord, ReferenceSet};

/// Extract the dominant color of an image file
///
/// This is the main entry point for single-image extraction. It decodes the
/// file and runs the default extractor.
///
/// # Errors
///
/// Returns `ExtractionError` if:
/// - Image cannot be loaded or is an unsupported format (`DecodeError`)
/// - Every pixel is transparent (`NoVisiblePixels`)
pub fn extract_dominant_color(image_path: &Path) -> Result<DominantColorInfo> {
    let image = image_loader::load_image(image_path)?;
    ColorExtractor::new().extract_dominant_color(&image)
}

/// Extract the dominant color of an encoded image held in memory
///
/// # Errors
///
/// Same as [`extract_dominant_color`]
pub fn extract_dominant_color_from_memory(bytes: &[u8]) -> Result<DominantColorInfo> {
    let image = image_loader::load_image_from_memory(bytes)?;
    ColorExtractor::new().extract_dominant_color(&image)
}

/// Extract the dominant color and the palette of an image file
///
/// # Errors
///
/// Same as [`extract_dominant_color`], plus `InvalidParameter` for
/// out-of-range `options`
pub fn extract_colors(image_path: &Path, options: &PaletteOptions) -> Result<ExtractedColors> {
    let image = image_loader::load_image(image_path)?;
    ColorExtractor::new().extract_colors(&image, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_memory_rejects_garbage() {
        let result = extract_dominant_color_from_memory(&[0u8; 16]);
        assert!(matches!(result, Err(ExtractionError::DecodeError { .. })));
    }

    #[test]
    fn test_extract_missing_file() {
        let result = extract_dominant_color(Path::new("nonexistent_file.jpg"));
        assert!(matches!(result, Err(ExtractionError::DecodeError { .. })));
    }
}
