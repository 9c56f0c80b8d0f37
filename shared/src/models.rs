//! Shared data models.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::{Error, Result};

pub const DEFAULT_CONTENT_TYPE: &str = "youtube";
pub const DEFAULT_TARGET_AUDIENCE: &str = "general";
pub const DEFAULT_TONE: &str = "engaging";

/// Message returned when either required field is missing.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Topic and niche are required";

/// Current time as an ISO-8601 UTC string with millisecond precision.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Raw content generation payload as received from API Gateway.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequestBody {
    #[serde(default, deserialize_with = "non_blank")]
    #[validate(required)]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    #[validate(required)]
    pub niche: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

/// Blank strings count as absent.
fn non_blank<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl ContentRequestBody {
    /// Validate required fields and apply defaults.
    pub fn into_request(self) -> Result<ContentRequest> {
        self.validate()
            .map_err(|_| Error::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        match (self.topic, self.niche) {
            (Some(topic), Some(niche)) => Ok(ContentRequest {
                topic,
                niche,
                content_type: self
                    .content_type
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
                target_audience: self
                    .target_audience
                    .unwrap_or_else(|| DEFAULT_TARGET_AUDIENCE.to_string()),
                tone: self.tone.unwrap_or_else(|| DEFAULT_TONE.to_string()),
            }),
            _ => Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// Validated content generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub topic: String,
    pub niche: String,
    pub content_type: String,
    pub target_audience: String,
    pub tone: String,
}

impl ContentRequest {
    /// Request with defaults for every optional field.
    pub fn new(topic: impl Into<String>, niche: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            niche: niche.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            target_audience: DEFAULT_TARGET_AUDIENCE.to_string(),
            tone: DEFAULT_TONE.to_string(),
        }
    }
}

/// Generated content payload returned as `data`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub script: String,
    pub titles: Vec<String>,
    pub hashtags: Vec<String>,
    pub description: String,
    pub metadata: ContentMetadata,
}

/// Echo of the request plus generation details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub topic: String,
    pub niche: String,
    pub content_type: String,
    pub target_audience: String,
    pub tone: String,
    pub generated_at: String,
    pub ai_model: String,
}

impl ContentMetadata {
    pub fn for_request(request: &ContentRequest, ai_model: impl Into<String>) -> Self {
        Self {
            topic: request.topic.clone(),
            niche: request.niche.clone(),
            content_type: request.content_type.clone(),
            target_audience: request.target_audience.clone(),
            tone: request.tone.clone(),
            generated_at: iso_timestamp(),
            ai_model: ai_model.into(),
        }
    }
}
