//! AWS Secrets Manager integration and provider credential resolution.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::gemini::GeminiClient;
use crate::provider::ProviderConfig;
use crate::{Config, Error, Result};

/// Cached secrets with lazy initialization.
static SECRETS_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn get_cache() -> &'static RwLock<HashMap<String, String>> {
    SECRETS_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// JSON shape of the API key secret.
#[derive(Debug, Deserialize)]
struct ApiKeySecret {
    api_key: String,
}

/// Get a secret value from Secrets Manager with caching.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    // Check cache first
    {
        let cache = get_cache().read().await;
        if let Some(value) = cache.get(secret_arn) {
            return Ok(value.clone());
        }
    }

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string();

    {
        let mut cache = get_cache().write().await;
        cache.insert(secret_arn.to_string(), secret_string.clone());
    }

    Ok(secret_string)
}

/// Extract the API key from a secret string.
///
/// Accepts either `{"api_key": "..."}` or the bare key.
pub fn parse_api_key(secret: &str) -> Result<String> {
    let trimmed = secret.trim();
    let key = if trimmed.starts_with('{') {
        serde_json::from_str::<ApiKeySecret>(trimmed)
            .map_err(|e| Error::Aws(format!("Failed to parse API key secret: {}", e)))?
            .api_key
    } else {
        trimmed.to_string()
    };

    if key.trim().is_empty() {
        return Err(Error::Aws("API key secret is empty".to_string()));
    }
    Ok(key)
}

/// Find the Gemini API key: `GEMINI_API_KEY` first, then the configured secret.
pub async fn resolve_gemini_api_key(config: &Config) -> Result<Option<String>> {
    if let Some(key) = &config.gemini_api_key {
        return Ok(Some(key.clone()));
    }

    let Some(secret_arn) = &config.gemini_api_key_secret_arn else {
        return Ok(None);
    };

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;
    let secrets_client = SecretsClient::new(&aws_config);

    let secret = get_secret(&secrets_client, secret_arn).await?;
    parse_api_key(&secret).map(Some)
}

/// Build the provider wiring for this process. Checked once at cold start.
///
/// A missing credential, or one that cannot be fetched, disables the provider
/// for the lifetime of the process.
pub async fn resolve_provider(config: &Config, http_client: reqwest::Client) -> ProviderConfig {
    match resolve_gemini_api_key(config).await {
        Ok(Some(api_key)) => {
            info!(model = %config.gemini_model, "Gemini AI initialized");
            ProviderConfig::enabled(
                GeminiClient::new(http_client, api_key)
                    .with_base_url(config.gemini_base_url.clone())
                    .with_model(config.gemini_model.clone()),
            )
        }
        Ok(None) => {
            info!("GEMINI_API_KEY not configured - using fallback content generation");
            ProviderConfig::Disabled
        }
        Err(e) => {
            warn!("Gemini credential unavailable, using fallback content generation: {}", e);
            ProviderConfig::Disabled
        }
    }
}
