//! Status Lambda - Health and discovery endpoints.
//!
//! Endpoints:
//! - GET /api/health - Service health and configuration summary
//! - GET /api/test - API smoke test listing the available routes
//!
//! Any other path answers 404 with the list of available routes.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use shared::http::{self, ROUTES};
use shared::models::iso_timestamp;
use shared::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SERVER_NAME: &str = "CreatorBoost AI v1.0";

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse<'a> {
    status: &'static str,
    timestamp: String,
    environment: &'a str,
    gemini_connected: bool,
    server: &'static str,
}

/// API test response
#[derive(Debug, Serialize)]
struct ApiTestResponse {
    success: bool,
    message: &'static str,
    timestamp: String,
    endpoints: &'static [&'static str],
}

async fn handler(config: Arc<Config>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let path = event.uri().path();
    let cors = &config.cors_allowed_origin;

    info!("Status request: {} {}", method, path);

    let response = match (method, path) {
        ("GET", "/api/health") => http::json_response(
            200,
            &HealthResponse {
                status: "OK",
                timestamp: iso_timestamp(),
                environment: &config.environment,
                gemini_connected: config.has_gemini_credential(),
                server: SERVER_NAME,
            },
            cors,
        )?,
        ("GET", "/api/test") => http::json_response(
            200,
            &ApiTestResponse {
                success: true,
                message: "CreatorBoost AI API is working",
                timestamp: iso_timestamp(),
                endpoints: ROUTES,
            },
            cors,
        )?,
        _ => {
            info!("Route not found: {}", path);
            http::not_found_response(path, cors)?
        }
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);
    info!(
        environment = %config.environment,
        gemini_configured = config.has_gemini_credential(),
        "Status function starting"
    );

    run(service_fn(move |event| {
        let config = Arc::clone(&config);
        async move { handler(config, event).await }
    }))
    .await
}
