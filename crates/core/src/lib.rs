//! Domain logic for survey submissions: the answer model, the row codec,
//! submission validation, and the tabular/geometry exporters.
//!
//! Everything in this crate is pure — no database or HTTP dependencies.

pub mod error;
pub mod export;
pub mod submission;
pub mod types;
