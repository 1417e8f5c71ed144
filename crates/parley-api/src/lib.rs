//! Parley HTTP application layer.
//!
//! The `parley` binary wires configuration, logging and storage together and
//! serves the router built here.

pub mod http;
pub mod state;
