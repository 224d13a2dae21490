//! Batch extraction and matching
//!
//! Processes many images against one reference catalog. Images are handled
//! in chunks of at most `concurrency` items on a dedicated thread pool, with
//! an optional cooldown between chunks. A failing image is recorded in the
//! report and never stops the rest of the batch.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;

use crate::config::BatchConfig;
use crate::extraction::{ColorExtractor, DominantColorInfo};
use crate::image_loader::{load_image, load_image_from_memory};
use crate::matching::{MatchResult, ReferenceSet};
use crate::{ExtractionError, Result};

/// Where a batch image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes { label: String, data: Vec<u8> },
}

impl ImageSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn from_bytes(label: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            label: label.into(),
            data,
        }
    }

    /// Name used in reports
    pub fn label(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Bytes { label, .. } => label.clone(),
        }
    }

    fn load(&self) -> Result<DynamicImage> {
        match self {
            ImageSource::Path(path) => load_image(path),
            ImageSource::Bytes { data, .. } => load_image_from_memory(data),
        }
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// A successfully processed image
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub label: String,
    pub dominant_color: DominantColorInfo,
    pub matches: Vec<MatchResult>,
}

/// An image that was skipped
#[derive(Debug)]
pub struct BatchFailure {
    pub label: String,
    pub error: ExtractionError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.items.len()
    }

    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.processed() + self.skipped()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line partial-success summary for display
    pub fn summary(&self) -> String {
        format!(
            "{} of {} images processed, {} skipped",
            self.processed(),
            self.total(),
            self.skipped()
        )
    }
}

/// Runs extraction and matching over many images
#[derive(Debug)]
pub struct BatchProcessor {
    config: BatchConfig,
    extractor: ColorExtractor,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig, extractor: ColorExtractor) -> Self {
        Self { config, extractor }
    }

    pub fn extractor(&self) -> &ColorExtractor {
        &self.extractor
    }

    /// Process every source and match its dominant color against `reference_set`
    ///
    /// # Errors
    ///
    /// Only fails when the configuration is invalid or the worker pool
    /// cannot be created. Per-image failures are collected in the report.
    pub fn process(
        &self,
        sources: &[ImageSource],
        reference_set: &ReferenceSet,
        tolerance: f32,
    ) -> Result<BatchReport> {
        self.config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency)
            .build()
            .map_err(|e| ExtractionError::config("Failed to build batch thread pool", e))?;

        let mut report = BatchReport::default();
        let chunk_count = sources.len().div_ceil(self.config.concurrency);

        for (index, chunk) in sources.chunks(self.config.concurrency).enumerate() {
            let outcomes: Vec<(String, Result<BatchItem>)> = pool.install(|| {
                chunk
                    .par_iter()
                    .map(|source| {
                        let label = source.label();
                        let outcome = self.process_one(source, &label, reference_set, tolerance);
                        (label, outcome)
                    })
                    .collect()
            });

            for (label, outcome) in outcomes {
                match outcome {
                    Ok(item) => report.items.push(item),
                    Err(error) => {
                        tracing::warn!(%label, %error, "skipping image");
                        report.failures.push(BatchFailure { label, error });
                    }
                }
            }

            let cooldown = self.config.cooldown();
            if index + 1 < chunk_count && !cooldown.is_zero() {
                std::thread::sleep(cooldown);
            }
        }

        tracing::info!(
            processed = report.processed(),
            skipped = report.skipped(),
            "batch complete"
        );
        Ok(report)
    }

    fn process_one(
        &self,
        source: &ImageSource,
        label: &str,
        reference_set: &ReferenceSet,
        tolerance: f32,
    ) -> Result<BatchItem> {
        let image = source.load()?;
        let dominant_color = self.extractor.extract_dominant_color(&image)?;
        let matches = reference_set.search(dominant_color.lab, tolerance);
        Ok(BatchItem {
            label: label.to_string(),
            dominant_color,
            matches,
        })
    }
}
