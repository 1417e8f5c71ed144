//! HTTP API for Parley.
//!
//! Five `POST` routes taking and returning JSON, plus `GET /health`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
