//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::iso_timestamp;
use crate::{Error, Result};

/// Routes served by this workspace, reported by the index and 404 responses.
pub const ROUTES: &[&str] = &[
    "GET /api/health",
    "GET /api/test",
    "POST /api/content/generate",
    "GET /api/content/test",
];

/// Standard API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`, stamped with the current time.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            fallback: None,
            message: None,
            error: None,
            timestamp: Some(iso_timestamp()),
        }
    }

    /// Mark the payload as (partly) synthesized. `false` leaves the flag out.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback.then_some(true);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Failure response with a message and no data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            fallback: None,
            message: Some(message.into()),
            error: None,
            timestamp: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Create a JSON response with the given status code and body.
pub fn json_response<T: Serialize>(status: u16, body: &T, cors_origin: &str) -> Result<Response<Body>> {
    let json = serde_json::to_string(body)?;
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("Access-Control-Allow-Origin", cors_origin)
        .body(Body::from(json))?)
}

/// Create a failure response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>, cors_origin: &str) -> Result<Response<Body>> {
    json_response(status, &ApiResponse::failure(message), cors_origin)
}

/// 404 response listing the available routes.
pub fn not_found_response(path: &str, cors_origin: &str) -> Result<Response<Body>> {
    json_response(
        404,
        &serde_json::json!({
            "success": false,
            "message": format!("Route {} not found", path),
            "availableRoutes": ROUTES,
        }),
        cors_origin,
    )
}

/// Parse a request body as JSON. An empty body parses as `T::default()`.
pub fn parse_json_body<T: DeserializeOwned + Default>(body: &Body) -> Result<T> {
    let bytes: &[u8] = body.as_ref();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))
}

/// Decode a JSON response body.
pub fn body_json(response: &Response<Body>) -> Result<serde_json::Value> {
    Ok(serde_json::from_slice(response.body().as_ref())?)
}
