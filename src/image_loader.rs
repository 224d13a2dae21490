//! Image loading and pixel buffer preparation
//!
//! This module provides a single entry point for decoding images from disk
//! or memory, and for preparing the bounded-size RGBA pixel buffer the
//! extraction strategies scan.
//!
//! ## Supported Formats
//!
//! Via the `image` crate: JPEG, PNG, GIF (first frame), WebP, TIFF, BMP,
//! ICO, TGA, PNM and QOI.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbaImage};

use crate::error::{ExtractionError, Result};

/// Decoded RGBA pixels handed to extraction strategies
pub type PixelBuffer = RgbaImage;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            _ => None,
        }
    }
}

/// Load and decode an image from disk
///
/// # Errors
///
/// Returns `ExtractionError::DecodeError` if:
/// - The extension is not a supported format
/// - File cannot be opened
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use lens_colors::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), lens_colors::ExtractionError>(())
/// ```
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(ExtractionError::DecodeError {
            message: format!("Unknown image format for file: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        ExtractionError::decode(format!("Failed to open image file: {}", path.display()), e)
    })?;

    reader
        .with_guessed_format()
        .map_err(|e| {
            ExtractionError::decode(format!("Failed to read image file: {}", path.display()), e)
        })?
        .decode()
        .map_err(|e| {
            ExtractionError::decode(format!("Failed to decode image: {}", path.display()), e)
        })
}

/// Decode an image already held in memory, sniffing its format
///
/// # Errors
///
/// Returns `ExtractionError::DecodeError` when the bytes are not a
/// decodable image
pub fn load_image_from_memory(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| ExtractionError::decode("Failed to decode image from memory", e))
}

/// Convert to RGBA and shrink so the longer side is at most `max_dimension`.
///
/// Uses nearest-neighbour sampling so no new colors are blended in.
pub fn downscale(image: &DynamicImage, max_dimension: u32) -> PixelBuffer {
    let (width, height) = (image.width(), image.height());
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return image.to_rgba8();
    }

    let scale = f64::from(max_dimension) / f64::from(longest);
    let new_width = ((f64::from(width) * scale).round() as u32).max(1);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);
    tracing::debug!(width, height, new_width, new_height, "downscaling image");

    image
        .resize_exact(new_width, new_height, FilterType::Nearest)
        .to_rgba8()
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "pbm", "pgm",
        "ppm", "pnm", "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
