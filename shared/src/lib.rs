//! Shared library for CreatorBoost Lambda functions.
//!
//! This crate provides the content generation pipeline (provider adapter,
//! timeout race, response parser, fallback synthesizer) and the HTTP envelope
//! used by every Lambda function.

pub mod config;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod generator;
pub mod http;
pub mod models;
pub mod parser;
pub mod provider;
pub mod race;
pub mod secrets;

pub use config::Config;
pub use error::{Error, Result};
pub use gemini::GeminiClient;
pub use generator::{ContentGenerator, Generation};
pub use http::ApiResponse;
pub use models::{ContentMetadata, ContentRequest, ContentRequestBody, GeneratedContent};
pub use parser::{parse_sections, ParsedSections};
pub use provider::{FailureReason, ProviderConfig, ProviderError, TextProvider};
pub use secrets::resolve_provider;
