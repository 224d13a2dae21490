//! Dominant color extraction
//!
//! Two strategies share the [`ExtractionStrategy`] interface:
//! - [`PaletteStrategy`]: median cut palette, preferred when enabled
//! - [`HistogramStrategy`]: quantized bucket counting, always available
//!
//! [`ColorExtractor`] runs them in order. A strategy failing with a
//! recoverable error hands over to the next one; any other error reaches
//! the caller.

mod histogram;
mod palette;
mod swatch;

pub use histogram::HistogramStrategy;
pub use palette::PaletteStrategy;
pub use swatch::Swatch;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::color::{Cmyk, ColorConverter, Hex, Hsl, LabColor, RgbColor};
use crate::config::{ExtractionConfig, PaletteOptions};
use crate::constants::histogram::PERCENTAGE_FLOOR;
use crate::image_loader::{downscale, PixelBuffer};
use crate::{ExtractionError, Result};

/// Raw result of one strategy run
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Swatches ordered by population, largest first
    pub swatches: Vec<Swatch>,
    /// Visible pixels that contributed to the swatches
    pub counted_pixels: u64,
    /// Final histogram quantization step, if a histogram was used
    pub quantization_step: Option<u8>,
}

impl Extraction {
    pub fn dominant(&self) -> Option<&Swatch> {
        self.swatches.first()
    }
}

/// Pixel-buffer based color extraction algorithm
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs and results
    fn name(&self) -> &'static str;

    /// Whether the strategy can run at all in this configuration
    fn is_available(&self) -> bool {
        true
    }

    /// Derive swatches from the visible pixels of `pixels`
    fn extract(&self, pixels: &PixelBuffer, options: &PaletteOptions) -> Result<Extraction>;
}

/// The most representative color of an image, in every supported model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantColorInfo {
    pub hex: Hex,
    pub rgb: RgbColor,
    pub hsl: Hsl,
    pub cmyk: Cmyk,
    pub lab: LabColor,
    /// Coverage of visible pixels, in percent; never below the floor
    pub percentage: f32,
}

impl DominantColorInfo {
    /// Build the record for `rgb`, clamping `coverage` into `[floor, 100]`.
    /// The floor itself never drops below `PERCENTAGE_FLOOR`.
    pub fn new(rgb: RgbColor, coverage: f32, floor: f32) -> Self {
        let converter = ColorConverter::new();
        let floor = if floor.is_finite() {
            floor.clamp(PERCENTAGE_FLOOR, 100.0)
        } else {
            PERCENTAGE_FLOOR
        };
        let percentage = if coverage.is_finite() {
            coverage.clamp(floor, 100.0)
        } else {
            floor
        };

        Self {
            hex: converter.rgb_to_hex(rgb),
            rgb,
            hsl: converter.rgb_to_hsl(rgb),
            cmyk: converter.rgb_to_cmyk(rgb),
            lab: converter.rgb_to_lab(rgb),
            percentage,
        }
    }
}

/// Dominant color plus the full palette it was chosen from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedColors {
    pub dominant_color: DominantColorInfo,
    pub colors: Vec<Swatch>,
    /// Name of the strategy that produced the result
    pub strategy: &'static str,
    /// Histogram step the result was counted at; absent for the palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantization_step: Option<u8>,
}

/// Color extractor chaining strategies from preferred to fallback
pub struct ColorExtractor {
    config: ExtractionConfig,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ColorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColorExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorExtractor")
            .field("config", &self.config)
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl ColorExtractor {
    /// Create an extractor with default parameters
    pub fn new() -> Self {
        Self::default_strategies(ExtractionConfig::default())
    }

    /// Create an extractor with the palette strategy first (when enabled)
    /// and the histogram strategy as fallback
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `config` fails validation
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::default_strategies(config))
    }

    /// Create an extractor with an explicit strategy order
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `config` fails validation
    pub fn with_strategies(
        config: ExtractionConfig,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, strategies })
    }

    fn default_strategies(config: ExtractionConfig) -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(PaletteStrategy::new(&config)),
            Box::new(HistogramStrategy::new(&config)),
        ];
        Self { config, strategies }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extract the dominant color using the configured palette options
    ///
    /// # Errors
    ///
    /// Returns `NoVisiblePixels` if every pixel is below the alpha threshold
    pub fn extract_dominant_color(&self, image: &DynamicImage) -> Result<DominantColorInfo> {
        self.extract_colors(image, &self.config.palette)
            .map(|colors| colors.dominant_color)
    }

    /// Extract the dominant color together with the palette of swatches
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for out-of-range `options`, and
    /// `NoVisiblePixels` if every pixel is below the alpha threshold
    pub fn extract_colors(
        &self,
        image: &DynamicImage,
        options: &PaletteOptions,
    ) -> Result<ExtractedColors> {
        options.validate()?;
        let pixels = downscale(image, self.config.max_dimension);
        let (strategy, extraction) = self.run_strategies(&pixels, options)?;

        let dominant = extraction.dominant().ok_or(ExtractionError::NoVisiblePixels {
            width: pixels.width(),
            height: pixels.height(),
        })?;
        let coverage = dominant.share_of(extraction.counted_pixels);
        let dominant_color =
            DominantColorInfo::new(dominant.rgb, coverage, self.config.percentage_floor);

        tracing::debug!(
            strategy,
            hex = %dominant_color.hex,
            coverage,
            percentage = dominant_color.percentage,
            swatches = extraction.swatches.len(),
            "extracted dominant color"
        );

        Ok(ExtractedColors {
            dominant_color,
            colors: extraction.swatches,
            strategy,
            quantization_step: extraction.quantization_step,
        })
    }

    fn run_strategies(
        &self,
        pixels: &PixelBuffer,
        options: &PaletteOptions,
    ) -> Result<(&'static str, Extraction)> {
        let mut last_error = None;

        for strategy in self.strategies.iter().filter(|s| s.is_available()) {
            match strategy.extract(pixels, options) {
                Ok(extraction) if !extraction.swatches.is_empty() => {
                    return Ok((strategy.name(), extraction));
                }
                Ok(_) => {
                    tracing::warn!(strategy = strategy.name(), "strategy produced no swatches");
                    last_error = Some(ExtractionError::PaletteUnavailable {
                        reason: format!("{} produced no swatches", strategy.name()),
                    });
                }
                Err(error) if error.is_recoverable() => {
                    tracing::warn!(strategy = strategy.name(), %error, "falling back");
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        Err(last_error.unwrap_or_else(|| ExtractionError::PaletteUnavailable {
            reason: "no extraction strategy available".into(),
        }))
    }
}
