//! Reference constants for color extraction and matching
//!
//! Compile-time defaults for the extraction pipeline. Runtime overrides live
//! in [`crate::config`].

/// Histogram extraction parameters
pub mod histogram {
    /// Longest image side after downscaling, in pixels
    pub const MAX_DIMENSION: u32 = 200;

    /// Pixels with alpha below this value are ignored (about 50% opacity)
    pub const ALPHA_THRESHOLD: u8 = 128;

    /// Quantization step for the first (fine) pass
    pub const FINE_STEP: u8 = 16;

    /// Quantization step for the refinement (coarse) pass
    pub const COARSE_STEP: u8 = 64;

    /// Minimum share of counted pixels the dominant bucket must hold
    /// before the coarse pass is skipped
    pub const MIN_DOMINANT_SHARE: f32 = 0.10;

    /// Lowest coverage percentage ever reported for a dominant color
    pub const PERCENTAGE_FLOOR: f32 = 15.0;
}

/// Palette (median cut) extraction parameters
pub mod palette {
    /// Default sampling stride; 1 samples every pixel
    pub const DEFAULT_QUALITY: u32 = 10;

    /// Default number of swatches to return
    pub const DEFAULT_COLOR_COUNT: usize = 10;

    /// Bounds on the swatch count
    pub const MIN_COLOR_COUNT: usize = 2;
    pub const MAX_COLOR_COUNT: usize = 256;

    /// Bits kept per channel when building the median cut histogram
    pub const SIGNIFICANT_BITS: u8 = 5;

    /// Contrast ratio required for readable body text on a swatch
    pub const MIN_BODY_TEXT_CONTRAST: f32 = 4.5;

    /// Contrast ratio required for readable title text on a swatch
    pub const MIN_TITLE_TEXT_CONTRAST: f32 = 3.0;
}

/// Similarity matching parameters
pub mod matching {
    /// Default maximum Lab distance for a match
    pub const DEFAULT_TOLERANCE: f32 = 20.0;

    /// Typical tolerance range exposed to users
    pub const MIN_TOLERANCE: f32 = 5.0;
    pub const MAX_TOLERANCE: f32 = 50.0;
}

/// Batch processing parameters
pub mod batch {
    use std::time::Duration;

    /// Maximum images processed at once
    pub const DEFAULT_CONCURRENCY: usize = 5;

    /// Pause between chunks of images
    pub const DEFAULT_COOLDOWN: Duration = Duration::ZERO;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_ranges() {
        assert!(histogram::FINE_STEP < histogram::COARSE_STEP);
        assert!(histogram::MIN_DOMINANT_SHARE > 0.0 && histogram::MIN_DOMINANT_SHARE < 1.0);
        assert!(histogram::PERCENTAGE_FLOOR < 100.0);
        assert!(palette::MIN_COLOR_COUNT < palette::MAX_COLOR_COUNT);
        assert!(palette::MIN_TITLE_TEXT_CONTRAST < palette::MIN_BODY_TEXT_CONTRAST);
        assert!(matching::MIN_TOLERANCE <= matching::DEFAULT_TOLERANCE);
        assert!(matching::DEFAULT_TOLERANCE <= matching::MAX_TOLERANCE);
    }

    #[test]
    fn test_batch_defaults() {
        assert!(batch::DEFAULT_CONCURRENCY > 0);
        assert!(batch::DEFAULT_COOLDOWN.as_millis() == 0);
    }
}
