//! Business logic and repository trait definitions for Parley.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the request decoding that turns raw JSON bodies into
//! typed requests, and the service that ties them together. It depends only
//! on `parley-types` -- never on `parley-infra` or any database crate.

pub mod repository;
pub mod request;
pub mod service;
