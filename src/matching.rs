//! Perceptual similarity search over a reference color catalog
//!
//! A brute-force scan computing the Euclidean Lab distance from the query to
//! every reference record. Records within the tolerance are returned closest
//! first; records at equal distance keep their catalog order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{ColorConverter, Hex, LabColor, RgbColor};
use crate::{ExtractionError, Result};

/// A precomputed catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceColorRecord {
    /// Catalog identifier
    #[serde(alias = "id")]
    pub lot_no: String,

    pub lab: LabColor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<RgbColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<Hex>,

    /// Descriptive color name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_group: Option<String>,
}

impl ReferenceColorRecord {
    pub fn new(lot_no: impl Into<String>, lab: LabColor) -> Self {
        Self {
            lot_no: lot_no.into(),
            lab,
            rgb: None,
            hex: None,
            color: None,
            quality_group: None,
        }
    }

    /// Build a record from an sRGB color, deriving its Lab coordinates
    pub fn from_rgb(lot_no: impl Into<String>, rgb: RgbColor) -> Self {
        let lab = ColorConverter::new().rgb_to_lab(rgb);
        Self {
            rgb: Some(rgb),
            hex: Some(Hex::from_rgb(rgb)),
            ..Self::new(lot_no, lab)
        }
    }
}

/// A reference record that fell within the search tolerance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub record: ReferenceColorRecord,

    /// Lab distance to the query; lower is closer
    pub similarity: f32,

    /// Display score in [0, 100]; 100 is an exact match
    pub match_percent: f32,
}

/// Display score for a distance under a given tolerance.
///
/// `100 - distance / tolerance * 100`, clamped to [0, 100]. A non-positive
/// tolerance only admits exact matches, which score 100.
pub fn match_percent(distance: f32, tolerance: f32) -> f32 {
    if tolerance <= 0.0 {
        return if distance <= 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 - distance / tolerance * 100.0).clamp(0.0, 100.0)
}

/// Find every record within `tolerance` of `query`, closest first
pub fn search(
    query: LabColor,
    reference_set: &[ReferenceColorRecord],
    tolerance: f32,
) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = reference_set
        .iter()
        .filter_map(|record| {
            let distance = query.distance(&record.lab);
            (distance <= tolerance).then(|| MatchResult {
                record: record.clone(),
                similarity: distance,
                match_percent: match_percent(distance, tolerance),
            })
        })
        .collect();

    // Vec::sort_by is stable, so equal distances keep catalog order
    matches.sort_by(|a, b| a.similarity.total_cmp(&b.similarity));

    tracing::debug!(
        candidates = reference_set.len(),
        matches = matches.len(),
        tolerance,
        "similarity search complete"
    );
    matches
}

/// An in-memory reference catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSet {
    records: Vec<ReferenceColorRecord>,
}

impl ReferenceSet {
    pub fn new(records: Vec<ReferenceColorRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ExtractionError::reference_load("Invalid reference color JSON", e))
    }

    /// Load a JSON array of records from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::reference_load(format!("Failed to read {}", path.display()), e)
        })?;
        let set = Self::from_json_str(&content)?;
        tracing::info!(records = set.len(), path = %path.display(), "loaded reference colors");
        Ok(set)
    }

    /// Build a catalog from `(identifier, hex)` pairs
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first malformed hex string
    pub fn from_hex_colors<I, S, H>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, H)>,
        S: Into<String>,
        H: AsRef<str>,
    {
        colors
            .into_iter()
            .map(|(id, hex)| {
                Hex::parse(hex.as_ref()).map(|hex| ReferenceColorRecord::from_rgb(id, hex.to_rgb()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn records(&self) -> &[ReferenceColorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search(&self, query: LabColor, tolerance: f32) -> Vec<MatchResult> {
        search(query, &self.records, tolerance)
    }
}
