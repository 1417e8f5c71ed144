//! Success response shapes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `201 Created` with the new entity's id: `{"id": n}`.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

impl Created {
    pub fn new(id: impl Into<i64>) -> Self {
        Self { id: id.into() }
    }
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}
