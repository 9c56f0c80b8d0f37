//! Configuration management for Lambda functions.

use std::env;
use std::time::Duration;

use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::{Error, Result};

const DEFAULT_CONTENT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_PROVIDER_TEST_TIMEOUT_MS: u64 = 15_000;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Gemini API key, if set directly
    pub gemini_api_key: Option<String>,
    /// ARN of the secret holding the Gemini API key
    pub gemini_api_key_secret_arn: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// Race duration for content generation
    pub content_timeout: Duration,
    /// Race duration for the provider connection test
    pub provider_test_timeout: Duration,
    /// Deployment environment name
    pub environment: String,
    /// Value of the Access-Control-Allow-Origin header
    pub cors_allowed_origin: String,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_api_key_secret_arn: non_empty("GEMINI_API_KEY_SECRET_ARN"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            content_timeout: millis(
                "CONTENT_TIMEOUT_MS",
                non_empty("CONTENT_TIMEOUT_MS"),
                DEFAULT_CONTENT_TIMEOUT_MS,
            )?,
            provider_test_timeout: millis(
                "PROVIDER_TEST_TIMEOUT_MS",
                non_empty("PROVIDER_TEST_TIMEOUT_MS"),
                DEFAULT_PROVIDER_TEST_TIMEOUT_MS,
            )?,
            environment: non_empty("APP_ENV").unwrap_or_else(|| "development".to_string()),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string()),
            aws_region: non_empty("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }

    /// Whether any Gemini credential source is configured.
    pub fn has_gemini_credential(&self) -> bool {
        self.gemini_api_key.is_some() || self.gemini_api_key_secret_arn.is_some()
    }
}

// The API key stays out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_api_key_secret_arn", &self.gemini_api_key_secret_arn)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("content_timeout", &self.content_timeout)
            .field("provider_test_timeout", &self.provider_test_timeout)
            .field("environment", &self.environment)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("aws_region", &self.aws_region)
            .finish()
    }
}

fn millis(key: &str, value: Option<String>, default: u64) -> Result<Duration> {
    match value {
        None => Ok(Duration::from_millis(default)),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(Error::Config(format!(
                "{} must be a positive number of milliseconds, got {:?}",
                key, raw
            ))),
        },
    }
}
