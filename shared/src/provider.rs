//! AI text provider abstraction.
//!
//! A provider turns a prompt into free text. The content generator only ever
//! talks to a [`TextProvider`] through a [`ProviderConfig`], which is resolved
//! once at cold start and never changes for the lifetime of the process.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a provider call or by the race wrapper around it.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No credential was configured at startup.
    #[error("AI provider is not configured")]
    Unavailable,

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but the payload carried no usable text.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The call did not settle within the race duration.
    #[error("request timeout after {0:?}")]
    Timeout(Duration),
}

/// Coarse classification of a provider failure, used for operator messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    ServiceDisabled,
    Unauthenticated,
    RateLimited,
    Timeout,
    Unavailable,
    Other,
}

impl ProviderError {
    /// Classify this error.
    pub fn reason(&self) -> FailureReason {
        match self {
            ProviderError::Unavailable => FailureReason::Unavailable,
            ProviderError::Timeout(_) => FailureReason::Timeout,
            ProviderError::Api { status: 403, .. } => FailureReason::ServiceDisabled,
            ProviderError::Api { status: 401, .. } => FailureReason::Unauthenticated,
            ProviderError::Api { status: 429, .. } => FailureReason::RateLimited,
            ProviderError::Api { message, .. } if message.contains("SERVICE_DISABLED") => {
                FailureReason::ServiceDisabled
            }
            ProviderError::Api { message, .. } if message.contains("UNAUTHENTICATED") => {
                FailureReason::Unauthenticated
            }
            ProviderError::Http(e) if e.is_timeout() => FailureReason::Timeout,
            _ => FailureReason::Other,
        }
    }
}

impl FailureReason {
    /// Short label, safe to return to clients.
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::ServiceDisabled => "service_disabled",
            FailureReason::Unauthenticated => "unauthenticated",
            FailureReason::RateLimited => "rate_limited",
            FailureReason::Timeout => "timeout",
            FailureReason::Unavailable => "unavailable",
            FailureReason::Other => "provider_error",
        }
    }

    /// Human-readable summary.
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::ServiceDisabled => "Generative Language API is not enabled",
            FailureReason::Unauthenticated => "Invalid API key",
            FailureReason::RateLimited => "API rate limit exceeded",
            FailureReason::Timeout => "Request timeout",
            FailureReason::Unavailable => {
                "AI service temporarily unavailable - please try again later"
            }
            FailureReason::Other => "Gemini AI test failed",
        }
    }

    /// What an operator should do about it.
    pub fn instructions(&self) -> &'static str {
        match self {
            FailureReason::ServiceDisabled => {
                "Enable the Generative Language API in your Google Cloud Console"
            }
            FailureReason::Unauthenticated => {
                "Check GEMINI_API_KEY or the secret referenced by GEMINI_API_KEY_SECRET_ARN"
            }
            FailureReason::RateLimited => "Wait for the quota window to reset and try again",
            FailureReason::Timeout => "The API request timed out. Please try again.",
            FailureReason::Unavailable => {
                "Set GEMINI_API_KEY or GEMINI_API_KEY_SECRET_ARN and redeploy the function"
            }
            FailureReason::Other => "Inspect the function logs for the provider response",
        }
    }
}

/// Prompt-in, text-out generation capability.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Display label reported as `metadata.aiModel`.
    fn label(&self) -> &str;

    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Provider wiring injected into the generator at construction.
#[derive(Clone)]
pub enum ProviderConfig {
    /// No credential was found at startup. Every request is synthesized.
    Disabled,
    /// Live provider.
    Enabled(Arc<dyn TextProvider>),
}

impl ProviderConfig {
    pub fn enabled(provider: impl TextProvider + 'static) -> Self {
        ProviderConfig::Enabled(Arc::new(provider))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ProviderConfig::Enabled(_))
    }

    /// The provider, or [`ProviderError::Unavailable`] when disabled.
    pub fn provider(&self) -> Result<&Arc<dyn TextProvider>, ProviderError> {
        match self {
            ProviderConfig::Enabled(provider) => Ok(provider),
            ProviderConfig::Disabled => Err(ProviderError::Unavailable),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Disabled => f.write_str("Disabled"),
            ProviderConfig::Enabled(provider) => {
                f.debug_tuple("Enabled").field(&provider.label()).finish()
            }
        }
    }
}
