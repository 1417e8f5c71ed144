//! Request extractors.

pub mod json_body;
