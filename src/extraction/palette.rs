//! Median cut palette quantization
//!
//! Samples every `quality`-th visible pixel, reduces each sample to
//! `SIGNIFICANT_BITS` per channel, and splits the resulting color boxes at
//! their weighted median until `color_count` boxes exist. The first 75% of
//! splits go to the most populated boxes, the rest to the boxes with the
//! largest population times volume, so large flat areas and small vivid
//! regions both get swatches.

use std::collections::HashMap;

use crate::color::RgbColor;
use crate::config::{ExtractionConfig, PaletteOptions};
use crate::constants::palette::SIGNIFICANT_BITS;
use crate::extraction::{Extraction, ExtractionStrategy, Swatch};
use crate::image_loader::PixelBuffer;
use crate::{ExtractionError, Result};

const POPULATION_FRACTION: f32 = 0.75;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: [u8; 3],
    count: u32,
    sum: [u64; 3],
}

#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<Entry>,
}

impl ColorBox {
    fn population(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    fn ranges(&self) -> [u8; 3] {
        let mut min = [u8::MAX; 3];
        let mut max = [0u8; 3];
        for entry in &self.entries {
            for axis in 0..3 {
                min[axis] = min[axis].min(entry.key[axis]);
                max[axis] = max[axis].max(entry.key[axis]);
            }
        }
        [
            max[0].saturating_sub(min[0]),
            max[1].saturating_sub(min[1]),
            max[2].saturating_sub(min[2]),
        ]
    }

    fn volume(&self) -> u64 {
        self.ranges().iter().map(|r| u64::from(*r) + 1).product()
    }

    fn can_split(&self) -> bool {
        self.entries.len() > 1
    }

    /// Mean of the original (unquantized) pixels in this box
    fn average(&self) -> RgbColor {
        let count = u64::from(self.population().max(1));
        let mut sum = [0u64; 3];
        for entry in &self.entries {
            for axis in 0..3 {
                sum[axis] += entry.sum[axis];
            }
        }
        let mean = |total: u64| ((total + count / 2) / count).min(255) as u8;
        RgbColor::new(mean(sum[0]), mean(sum[1]), mean(sum[2]))
    }

    /// Split along the widest axis at the weighted median
    fn split(mut self) -> (ColorBox, ColorBox) {
        let ranges = self.ranges();
        let axis = if ranges[0] >= ranges[1] && ranges[0] >= ranges[2] {
            0
        } else if ranges[1] >= ranges[2] {
            1
        } else {
            2
        };

        self.entries.sort_by_key(|e| e.key[axis]);

        let half = u64::from(self.population()) / 2;
        let mut accumulated = 0u64;
        let mut split_idx = 1;
        for (i, entry) in self.entries.iter().enumerate() {
            accumulated += u64::from(entry.count);
            if accumulated >= half {
                split_idx = i + 1;
                break;
            }
        }
        let split_idx = split_idx.clamp(1, self.entries.len() - 1);

        let right = self.entries.split_off(split_idx);
        (ColorBox { entries: self.entries }, ColorBox { entries: right })
    }
}

/// Split boxes until `target` exist or none can be split, always picking
/// the splittable box with the highest priority.
fn split_boxes<F>(boxes: &mut Vec<ColorBox>, target: usize, priority: F)
where
    F: Fn(&ColorBox) -> u64,
{
    while boxes.len() < target {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.can_split())
            .max_by_key(|(_, b)| priority(b))
            .map(|(i, _)| i);
        let Some(index) = candidate else {
            break;
        };
        let (left, right) = boxes.swap_remove(index).split();
        boxes.push(left);
        boxes.push(right);
    }
}

fn median_cut(entries: Vec<Entry>, color_count: usize) -> Vec<ColorBox> {
    let mut boxes = vec![ColorBox { entries }];
    let population_target = ((color_count as f32 * POPULATION_FRACTION).ceil() as usize).max(1);

    split_boxes(&mut boxes, population_target, |b| u64::from(b.population()));
    split_boxes(&mut boxes, color_count, |b| u64::from(b.population()) * b.volume());
    boxes
}

/// Preferred extraction strategy
#[derive(Debug, Clone)]
pub struct PaletteStrategy {
    alpha_threshold: u8,
    enabled: bool,
}

impl Default for PaletteStrategy {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl PaletteStrategy {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            alpha_threshold: config.alpha_threshold,
            enabled: config.use_palette,
        }
    }

    fn sample(&self, pixels: &PixelBuffer, quality: u32) -> (Vec<Entry>, u64) {
        let shift = 8 - SIGNIFICANT_BITS;
        let stride = quality.max(1) as usize;
        let mut histogram: HashMap<[u8; 3], Entry> = HashMap::new();
        let mut sampled = 0u64;

        for pixel in pixels.pixels().step_by(stride) {
            let [r, g, b, a] = pixel.0;
            if a < self.alpha_threshold {
                continue;
            }
            let key = [r >> shift, g >> shift, b >> shift];
            let entry = histogram.entry(key).or_insert(Entry {
                key,
                count: 0,
                sum: [0; 3],
            });
            entry.count += 1;
            entry.sum[0] += u64::from(r);
            entry.sum[1] += u64::from(g);
            entry.sum[2] += u64::from(b);
            sampled += 1;
        }

        let mut entries: Vec<Entry> = histogram.into_values().collect();
        entries.sort_by_key(|e| e.key);
        (entries, sampled)
    }
}

impl ExtractionStrategy for PaletteStrategy {
    fn name(&self) -> &'static str {
        "palette"
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn extract(&self, pixels: &PixelBuffer, options: &PaletteOptions) -> Result<Extraction> {
        options.validate().map_err(|e| ExtractionError::PaletteUnavailable {
            reason: e.to_string(),
        })?;

        let (entries, sampled) = self.sample(pixels, options.quality);
        if entries.is_empty() {
            return Err(ExtractionError::PaletteUnavailable {
                reason: format!(
                    "no visible pixels sampled at quality {} from {}x{} image",
                    options.quality,
                    pixels.width(),
                    pixels.height()
                ),
            });
        }

        let mut swatches: Vec<Swatch> = median_cut(entries, options.color_count)
            .iter()
            .map(|b| Swatch::new(b.average(), b.population()))
            .collect();
        swatches.sort_by(|a, b| b.population.cmp(&a.population).then_with(|| a.rgb.cmp(&b.rgb)));

        Ok(Extraction {
            swatches,
            counted_pixels: sampled,
            quantization_step: None,
        })
    }
}
