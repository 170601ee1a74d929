//! HTTP layer for the submission engine: error mapping, configuration,
//! shared state, routes, and handlers.

pub mod config;
pub mod convert;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
