//! HTTP request handlers.
//!
//! Each handler decodes the JSON body into a typed request, runs it through
//! the messenger service and maps the outcome to a response.

pub mod chat;
pub mod message;
pub mod user;
