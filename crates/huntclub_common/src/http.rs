// --- File: crates/huntclub_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, HuntclubError};

pub mod client;

/// Converts an error into an axum HTTP response.
pub trait IntoHttpResponse {
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for HuntclubError {
    /// Renders `{ "error": "<message>" }` with the status from [`HttpStatusCode`].
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for HuntclubError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
