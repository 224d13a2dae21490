//! Configuration structures for the lens_colors pipeline.
//!
//! This module defines all tunable parameters for extraction, matching and
//! batch processing.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use lens_colors::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), lens_colors::ExtractionError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ExtractionConfig`]: histogram quantization and palette settings
//! - [`MatchingConfig`]: similarity tolerance
//! - [`BatchConfig`]: concurrency and cooldown between chunks

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{batch, histogram, matching, palette};
use crate::{ExtractionError, Result};

/// Complete pipeline configuration.
///
/// Can be serialized to/from JSON for reproducible runs. Missing sections
/// fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Dominant color extraction configuration
    pub extraction: ExtractionConfig,

    /// Similarity matching configuration
    pub matching: MatchingConfig,

    /// Batch processing configuration
    pub batch: BatchConfig,
}

/// Extraction parameters.
///
/// Controls downscaling, transparency handling and the quantization passes
/// of the histogram strategy, plus the palette strategy options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Longest side of the image after downscaling
    pub max_dimension: u32,

    /// Pixels with lower alpha are not counted
    pub alpha_threshold: u8,

    /// Quantization step for the first histogram pass
    pub fine_step: u8,

    /// Quantization step used when the fine pass is too fragmented
    pub coarse_step: u8,

    /// Minimum share (0.0-1.0) the dominant bucket needs to skip the coarse pass
    pub min_dominant_share: f32,

    /// Lowest coverage percentage reported for a dominant color
    pub percentage_floor: f32,

    /// Try the palette strategy before the histogram strategy
    pub use_palette: bool,

    /// Palette strategy options
    pub palette: PaletteOptions,
}

/// Tuning hints for palette extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteOptions {
    /// Sampling stride: 1 reads every pixel, higher values are faster
    pub quality: u32,

    /// Maximum number of swatches returned
    pub color_count: usize,
}

/// Similarity matching parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Maximum Lab distance for a reference record to match
    pub tolerance: f32,
}

/// Batch processing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Images processed at the same time
    pub concurrency: usize,

    /// Pause between chunks in milliseconds
    pub cooldown_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_dimension: histogram::MAX_DIMENSION,
            alpha_threshold: histogram::ALPHA_THRESHOLD,
            fine_step: histogram::FINE_STEP,
            coarse_step: histogram::COARSE_STEP,
            min_dominant_share: histogram::MIN_DOMINANT_SHARE,
            percentage_floor: histogram::PERCENTAGE_FLOOR,
            use_palette: true,
            palette: PaletteOptions::default(),
        }
    }
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            quality: palette::DEFAULT_QUALITY,
            color_count: palette::DEFAULT_COLOR_COUNT,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance: matching::DEFAULT_TOLERANCE,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: batch::DEFAULT_CONCURRENCY,
            cooldown_ms: batch::DEFAULT_COOLDOWN.as_millis() as u64,
        }
    }
}

impl ExtractionConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first out-of-range field
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(ExtractionError::invalid_parameter("max_dimension", self.max_dimension));
        }
        if self.fine_step == 0 {
            return Err(ExtractionError::invalid_parameter("fine_step", self.fine_step));
        }
        if self.coarse_step <= self.fine_step {
            return Err(ExtractionError::invalid_parameter("coarse_step", self.coarse_step));
        }
        if !(0.0..=1.0).contains(&self.min_dominant_share) {
            return Err(ExtractionError::invalid_parameter(
                "min_dominant_share",
                self.min_dominant_share,
            ));
        }
        if !(histogram::PERCENTAGE_FLOOR..=100.0).contains(&self.percentage_floor) {
            return Err(ExtractionError::invalid_parameter(
                "percentage_floor",
                self.percentage_floor,
            ));
        }
        self.palette.validate()
    }
}

impl PaletteOptions {
    pub fn new(quality: u32, color_count: usize) -> Self {
        Self { quality, color_count }
    }

    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero quality or a color count
    /// outside the supported range
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 {
            return Err(ExtractionError::invalid_parameter("quality", self.quality));
        }
        if !(palette::MIN_COLOR_COUNT..=palette::MAX_COLOR_COUNT).contains(&self.color_count) {
            return Err(ExtractionError::invalid_parameter("color_count", self.color_count));
        }
        Ok(())
    }
}

impl MatchingConfig {
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a negative or non-finite tolerance
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ExtractionError::invalid_parameter("tolerance", self.tolerance));
        }
        if !(matching::MIN_TOLERANCE..=matching::MAX_TOLERANCE).contains(&self.tolerance) {
            tracing::warn!(
                tolerance = self.tolerance,
                "tolerance outside the usual {}-{} range",
                matching::MIN_TOLERANCE,
                matching::MAX_TOLERANCE
            );
        }
        Ok(())
    }
}

impl BatchConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// # Errors
    ///
    /// Returns `InvalidParameter` when concurrency is zero
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(ExtractionError::invalid_parameter("concurrency", self.concurrency));
        }
        Ok(())
    }
}

impl PipelineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.matching.validate()?;
        self.batch.validate()
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ExtractionError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ExtractionError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            ExtractionError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.max_dimension, 200);
        assert_eq!(config.extraction.alpha_threshold, 128);
        assert_eq!(config.batch.concurrency, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"matching": {"tolerance": 12.5}}"#).unwrap();
        assert_eq!(config.matching.tolerance, 12.5);
        assert_eq!(config.extraction, ExtractionConfig::default());
        assert_eq!(config.batch, BatchConfig::default());
    }

    #[test]
    fn test_palette_options_use_camel_case() {
        let options: PaletteOptions =
            serde_json::from_str(r#"{"quality": 1, "colorCount": 4}"#).unwrap();
        assert_eq!(options, PaletteOptions::new(1, 4));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut extraction = ExtractionConfig::default();
        extraction.coarse_step = extraction.fine_step;
        assert!(extraction.validate().is_err());

        assert!(PaletteOptions::new(0, 8).validate().is_err());
        assert!(PaletteOptions::new(1, 1).validate().is_err());
        assert!(PaletteOptions::new(1, 257).validate().is_err());

        assert!(MatchingConfig { tolerance: -1.0 }.validate().is_err());
        assert!(MatchingConfig { tolerance: f32::NAN }.validate().is_err());
        assert!(MatchingConfig { tolerance: 0.0 }.validate().is_ok());

        let batch = BatchConfig {
            concurrency: 0,
            cooldown_ms: 0,
        };
        assert!(batch.validate().is_err());
    }

    #[test]
    fn test_percentage_floor_below_minimum_rejected() {
        let extraction = ExtractionConfig {
            percentage_floor: 0.0,
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            extraction.validate(),
            Err(ExtractionError::InvalidParameter { ref parameter, .. })
                if parameter == "percentage_floor"
        ));

        let raised = ExtractionConfig {
            percentage_floor: 25.0,
            ..ExtractionConfig::default()
        };
        assert!(raised.validate().is_ok());
    }

    #[test]
    fn test_coarse_step_must_exceed_fine_step() {
        let extraction = ExtractionConfig {
            fine_step: 32,
            coarse_step: 16,
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            extraction.validate(),
            Err(ExtractionError::InvalidParameter { ref parameter, .. })
                if parameter == "coarse_step"
        ));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "lens_colors_config_{}.json",
            std::process::id()
        ));
        let mut config = PipelineConfig::default();
        config.matching.tolerance = 30.0;
        config.batch.cooldown_ms = 250;

        config.to_json_file(&path).unwrap();
        let loaded = PipelineConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
        assert_eq!(loaded.batch.cooldown(), Duration::from_millis(250));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = PipelineConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ExtractionError::ConfigError { .. })));
    }
}
