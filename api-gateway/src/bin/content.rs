//! Content Lambda - Handles /api/content/* endpoints.
//!
//! Endpoints:
//! - POST /api/content/generate - Generate script, titles, hashtags and description
//! - GET /api/content/test - Check connectivity with the AI provider
//!
//! Provider failures never surface as HTTP errors: the generator falls back to
//! template content and the envelope carries `fallback: true`.

use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde_json::json;
use shared::http::{self, ApiResponse};
use shared::models::iso_timestamp;
use shared::{
    resolve_provider, Config, ContentGenerator, ContentRequestBody, ProviderConfig, ProviderError,
};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;

const UNEXPECTED_FAILURE_MESSAGE: &str = "Failed to generate content";
const UNEXPECTED_FAILURE_ERROR: &str = "Service temporarily unavailable";

/// Application state shared across requests.
struct AppState {
    config: Config,
    generator: ContentGenerator,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let provider = resolve_provider(&config, reqwest::Client::new()).await;
        Ok(Self::with_provider(config, provider))
    }

    fn with_provider(config: Config, provider: ProviderConfig) -> Self {
        let generator = ContentGenerator::new(provider, config.content_timeout);
        Self { config, generator }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let request_id = event
        .lambda_context_ref()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();
    let span = info_span!(
        "content_request",
        request_id = %request_id,
        method = %event.method(),
        path = %event.uri().path()
    );

    respond(&state, &event).instrument(span).await
}

async fn respond(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    match route(state, event).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Content request failed: {}", e);
            Ok(unexpected_failure_response(&state.config.cors_allowed_origin)?)
        }
    }
}

/// Sanitized 500 for failures outside the provider path. Details stay in the logs.
fn unexpected_failure_response(cors: &str) -> shared::Result<Response<Body>> {
    let body = ApiResponse::failure(UNEXPECTED_FAILURE_MESSAGE).with_error(UNEXPECTED_FAILURE_ERROR);
    http::json_response(500, &body, cors)
}

async fn route(state: &AppState, event: &Request) -> shared::Result<Response<Body>> {
    let method = event.method().as_str();
    let path = event.uri().path();

    info!("Content request: {} {}", method, path);

    match (method, path) {
        ("POST", "/api/content/generate") => generate(state, event).await,
        ("GET", "/api/content/test") => test_connection(state).await,
        _ => http::not_found_response(path, &state.config.cors_allowed_origin),
    }
}

async fn generate(state: &AppState, event: &Request) -> shared::Result<Response<Body>> {
    let cors = &state.config.cors_allowed_origin;

    let request = match http::parse_json_body::<ContentRequestBody>(event.body())
        .and_then(ContentRequestBody::into_request)
    {
        Ok(request) => request,
        Err(e) => {
            let status = e.status_code();
            return match e {
                shared::Error::Validation(message) => {
                    info!("Rejected content request: {}", message);
                    http::error_response(status, message, cors)
                }
                e => Err(e),
            };
        }
    };

    info!(
        topic = %request.topic,
        niche = %request.niche,
        content_type = %request.content_type,
        "Content generation request received"
    );

    let generation = state.generator.generate(&request).await;

    let body = ApiResponse::success(generation.content)
        .with_fallback(generation.fallback)
        .with_message(generation.message);

    http::json_response(200, &body, cors)
}

async fn test_connection(state: &AppState) -> shared::Result<Response<Body>> {
    let cors = &state.config.cors_allowed_origin;

    info!("Testing AI provider connection");

    match state
        .generator
        .test_connection(state.config.provider_test_timeout)
        .await
    {
        Ok(response) => {
            info!("AI provider test successful");
            http::json_response(
                200,
                &json!({
                    "success": true,
                    "message": "Gemini AI is working",
                    "response": response,
                    "timestamp": iso_timestamp(),
                }),
                cors,
            )
        }
        Err(ProviderError::Unavailable) => {
            let reason = ProviderError::Unavailable.reason();
            warn!("AI provider test requested but no provider is configured");
            http::json_response(
                500,
                &json!({
                    "success": false,
                    "message": reason.message(),
                    "instructions": reason.instructions(),
                }),
                cors,
            )
        }
        Err(e) => {
            let reason = e.reason();
            warn!(reason = reason.label(), "AI provider test failed: {}", e);
            http::json_response(
                500,
                &json!({
                    "success": false,
                    "message": reason.message(),
                    "error": reason.label(),
                    "instructions": reason.instructions(),
                }),
                cors,
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
