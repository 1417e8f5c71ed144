//! JSON request body extractor.
//!
//! Unlike `axum::Json`, this yields an untyped [`serde_json::Value`] so field
//! validation can report which field is wrong, and it rejects with the
//! service's own messages:
//!
//! - `Content-Type` may be absent; if present it must parse and name
//!   `application/json` (parameters such as `charset` are accepted).
//! - The body must not be empty.
//! - The body must be well-formed JSON.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::http::error::AppError;

/// A request body parsed as arbitrary JSON.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::payload(rejection.status(), rejection.body_text()))?;

        if bytes.is_empty() {
            return Err(AppError::payload(StatusCode::BAD_REQUEST, "No body provided"));
        }

        let value = serde_json::from_slice(&bytes)
            .map_err(|_| AppError::payload(StatusCode::BAD_REQUEST, "Malformed JSON"))?;

        Ok(JsonBody(value))
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(header) = headers.get(CONTENT_TYPE) else {
        return Ok(());
    };

    let malformed = || AppError::payload(StatusCode::BAD_REQUEST, "Malformed Content-Type header");
    let value = header.to_str().map_err(|_| malformed())?;
    let media_type = parse_media_type(value).ok_or_else(malformed)?;

    if media_type != "application/json" {
        return Err(AppError::payload(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Content-Type header must be application/json",
        ));
    }
    Ok(())
}

/// Parse `type/subtype *(; name=value)` and return the lowercased media type.
///
/// Returns `None` when the header does not have that shape.
fn parse_media_type(value: &str) -> Option<String> {
    let mut parts = value.split(';');
    let essence = parts.next()?.trim();

    let (kind, subtype) = essence.split_once('/')?;
    if !is_token(kind) || !is_token(subtype) {
        return None;
    }

    for param in parts {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let (name, param_value) = param.split_once('=')?;
        if !is_token(name.trim()) || param_value.trim().is_empty() {
            return None;
        }
    }

    Some(essence.to_ascii_lowercase())
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
