//! Histogram bucket counting with adaptive refinement
//!
//! Every visible pixel is quantized into a bucket of `step` units per
//! channel and counted. When the most populated bucket holds less than the
//! configured share of pixels the image is too fragmented at that
//! granularity, and the count is redone with the coarse step.

use std::collections::HashMap;

use crate::color::RgbColor;
use crate::config::{ExtractionConfig, PaletteOptions};
use crate::extraction::{Extraction, ExtractionStrategy, Swatch};
use crate::image_loader::PixelBuffer;
use crate::{ExtractionError, Result};

/// Pixel counts for one quantized color. The representative color is the
/// mean of the pixels that landed in the bucket.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    count: u32,
    sum: [u64; 3],
}

impl Bucket {
    fn add(&mut self, rgb: [u8; 3]) {
        self.count += 1;
        for (total, channel) in self.sum.iter_mut().zip(rgb) {
            *total += u64::from(channel);
        }
    }

    fn representative(&self) -> RgbColor {
        let count = u64::from(self.count.max(1));
        let mean = |total: u64| ((total + count / 2) / count).min(255) as u8;
        RgbColor::new(mean(self.sum[0]), mean(self.sum[1]), mean(self.sum[2]))
    }
}

/// Buckets ranked by population, most populated first
struct BucketCounts {
    ranked: Vec<([u8; 3], Bucket)>,
    counted: u64,
}

impl BucketCounts {
    fn dominant_share(&self) -> f32 {
        match self.ranked.first() {
            Some((_, bucket)) if self.counted > 0 => {
                (f64::from(bucket.count) / self.counted as f64) as f32
            }
            _ => 0.0,
        }
    }
}

/// Fallback extraction strategy; works on any pixel buffer
#[derive(Debug, Clone)]
pub struct HistogramStrategy {
    alpha_threshold: u8,
    fine_step: u8,
    coarse_step: u8,
    min_dominant_share: f32,
}

impl Default for HistogramStrategy {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl HistogramStrategy {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            alpha_threshold: config.alpha_threshold,
            fine_step: config.fine_step.max(1),
            coarse_step: config.coarse_step.max(1),
            min_dominant_share: config.min_dominant_share,
        }
    }

    fn count(&self, pixels: &PixelBuffer, step: u8) -> BucketCounts {
        let mut buckets: HashMap<[u8; 3], Bucket> = HashMap::new();
        let mut counted = 0u64;

        for pixel in pixels.pixels() {
            let [r, g, b, a] = pixel.0;
            if a < self.alpha_threshold {
                continue;
            }
            let key = [r / step, g / step, b / step];
            buckets.entry(key).or_default().add([r, g, b]);
            counted += 1;
        }

        let mut ranked: Vec<_> = buckets.into_iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(&b.0)));
        BucketCounts { ranked, counted }
    }
}

impl ExtractionStrategy for HistogramStrategy {
    fn name(&self) -> &'static str {
        "histogram"
    }

    fn extract(&self, pixels: &PixelBuffer, options: &PaletteOptions) -> Result<Extraction> {
        let mut counts = self.count(pixels, self.fine_step);
        if counts.counted == 0 {
            return Err(ExtractionError::NoVisiblePixels {
                width: pixels.width(),
                height: pixels.height(),
            });
        }

        let mut step = self.fine_step;
        let share = counts.dominant_share();
        if share < self.min_dominant_share {
            tracing::debug!(
                share,
                fine_step = self.fine_step,
                coarse_step = self.coarse_step,
                "dominant bucket too small, re-counting with coarse step"
            );
            counts = self.count(pixels, self.coarse_step);
            step = self.coarse_step;
        }

        let swatches = counts
            .ranked
            .iter()
            .take(options.color_count.max(1))
            .map(|(_, bucket)| Swatch::new(bucket.representative(), bucket.count))
            .collect();

        Ok(Extraction {
            swatches,
            counted_pixels: counts.counted,
            quantization_step: Some(step),
        })
    }
}
