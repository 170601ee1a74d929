//! Geometry-format converter implementations.

use serde_json::Value;

use surveykit_core::error::CoreError;
use surveykit_core::export::geometry::GeometryConverter;

/// Serializes the feature collection as GeoJSON bytes.
///
/// Stand-in until the ogr2ogr-backed GeoPackage converter is wired in;
/// downstream GIS tooling opens GeoJSON just as well for now.
pub struct GeoJsonPassthrough;

impl GeometryConverter for GeoJsonPassthrough {
    fn content_type(&self) -> &'static str {
        "application/geo+json"
    }

    fn convert(&self, collection: &Value) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(collection)
            .map_err(|e| CoreError::Internal(format!("failed to serialize feature collection: {e}")))
    }
}
