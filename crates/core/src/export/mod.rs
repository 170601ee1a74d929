//! Export projections over stored answer rows: tabular (CSV) and
//! geometry (GeoJSON feature collection).

pub mod geometry;
pub mod tabular;
