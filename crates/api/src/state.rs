use std::sync::Arc;

use surveykit_core::export::geometry::GeometryConverter;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: surveykit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Geometry-format converter for the geospatial export.
    pub converter: Arc<dyn GeometryConverter>,
}
