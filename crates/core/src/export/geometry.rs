//! Geometry export of stored submissions.
//!
//! Folds the geometry-bearing rows of a survey into a GeoJSON
//! FeatureCollection, attributed per feature with the submission,
//! question id, and question title. The collection is hand-off input to
//! an external geometry-format converter (GeoPackage or similar).

use serde_json::{json, Value};

use crate::error::CoreError;
use crate::submission::codec::StoredAnswerRow;
use crate::submission::section::SectionMap;

/// Fold geometry-bearing rows into a GeoJSON FeatureCollection.
///
/// Returns `None` when no row carries a geometry — nothing to export is
/// a valid state, not an error.
pub fn to_feature_collection(rows: &[StoredAnswerRow], sections: &SectionMap) -> Option<Value> {
    let features: Vec<Value> = rows
        .iter()
        .filter_map(|row| {
            let geometry = row.value_geometry.as_ref()?;
            let title = sections
                .get(&row.section_id)
                .map(|s| s.title.as_str())
                .unwrap_or_default();
            Some(json!({
                "type": "Feature",
                "geometry": geometry,
                "properties": {
                    "submissionId": row.submission_id,
                    "questionId": row.section_id,
                    "questionTitle": title,
                },
            }))
        })
        .collect();

    if features.is_empty() {
        None
    } else {
        Some(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
    }
}

/// Converts a GeoJSON FeatureCollection into a binary geospatial
/// container format. Implementations wrap external conversion tooling;
/// this crate only defines the seam.
pub trait GeometryConverter: Send + Sync {
    /// Content type of the produced stream.
    fn content_type(&self) -> &'static str;

    fn convert(&self, collection: &Value) -> Result<Vec<u8>, CoreError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
