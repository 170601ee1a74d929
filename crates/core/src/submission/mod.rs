//! Submission engine: answer model, section metadata, the row codec, and
//! pre-persistence validation — all without database dependencies.

pub mod answer;
pub mod codec;
pub mod section;
pub mod validate;
