//! HTTP API. Routes are mounted under `/api/` and, except for the
//! health probe, require bearer token authentication.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;
