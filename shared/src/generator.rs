//! Content generation: prompt the provider, parse its answer, fill the gaps.

use std::time::Duration;

use tracing::{info, warn};

use crate::fallback;
use crate::models::{ContentMetadata, ContentRequest, GeneratedContent};
use crate::parser::{self, ParsedSections};
use crate::provider::{ProviderConfig, ProviderError, TextProvider};
use crate::race;

const PROVIDER_DISABLED_MESSAGE: &str =
    "Generated using fallback system (AI provider not configured)";
const PROVIDER_FAILED_MESSAGE: &str = "Content generated successfully using fallback system";
const PARTIAL_MESSAGE: &str =
    "Content generated successfully; missing sections were completed by the fallback system";
const SUCCESS_MESSAGE: &str = "Content generated successfully";

const CONNECTION_TEST_PROMPT: &str =
    "Say \"Hello from CreatorBoost AI! Gemini is working perfectly!\"";

/// Outcome of one generation request. Always carries complete content.
#[derive(Debug, Clone)]
pub struct Generation {
    pub content: GeneratedContent,
    /// True when any field came from the fallback synthesizer.
    pub fallback: bool,
    pub message: String,
}

/// Orchestrates provider calls and fallback synthesis.
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    provider: ProviderConfig,
    timeout: Duration,
}

impl ContentGenerator {
    pub fn new(provider: ProviderConfig, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Generate content for `request`. Provider failures are recovered here.
    pub async fn generate(&self, request: &ContentRequest) -> Generation {
        let provider = match &self.provider {
            ProviderConfig::Enabled(provider) => provider,
            ProviderConfig::Disabled => {
                info!("AI provider not configured, using fallback content generation");
                return Generation {
                    content: fallback::synthesize(request),
                    fallback: true,
                    message: PROVIDER_DISABLED_MESSAGE.to_string(),
                };
            }
        };

        info!(provider = provider.label(), "Sending request to AI provider");
        let prompt = build_prompt(request);

        match race::with_timeout(self.timeout, provider.generate(&prompt)).await {
            Ok(text) => {
                info!(response_length = text.len(), "AI provider response received");
                let (content, filled) =
                    complete(parser::parse_sections(&text), request, provider.label());

                info!(
                    script_length = content.script.len(),
                    titles = content.titles.len(),
                    hashtags = content.hashtags.len(),
                    description_length = content.description.len(),
                    "Content parsed"
                );

                if filled.is_empty() {
                    Generation {
                        content,
                        fallback: false,
                        message: SUCCESS_MESSAGE.to_string(),
                    }
                } else {
                    warn!(sections = ?filled, "Provider output incomplete, filled from fallback");
                    Generation {
                        content,
                        fallback: true,
                        message: PARTIAL_MESSAGE.to_string(),
                    }
                }
            }
            Err(e) => {
                let reason = e.reason();
                warn!(
                    reason = reason.label(),
                    "AI provider unavailable, using fallback content generation: {}", e
                );
                Generation {
                    content: fallback::synthesize(request),
                    fallback: true,
                    message: PROVIDER_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Send a fixed prompt to check provider connectivity.
    pub async fn test_connection(&self, timeout: Duration) -> Result<String, ProviderError> {
        let provider = self.provider.provider()?;
        race::with_timeout(timeout, provider.generate(CONNECTION_TEST_PROMPT)).await
    }
}

/// Fill any empty parsed section from the synthesizer.
///
/// Returns the content and the names of the sections that were filled.
fn complete(
    parsed: ParsedSections,
    request: &ContentRequest,
    ai_model: &str,
) -> (GeneratedContent, Vec<&'static str>) {
    let mut filled = Vec::new();

    let script = if parsed.script.is_empty() {
        filled.push("script");
        fallback::script(request)
    } else {
        parsed.script
    };
    let titles = if parsed.titles.is_empty() {
        filled.push("titles");
        fallback::titles(request)
    } else {
        parsed.titles
    };
    let hashtags = if parsed.hashtags.is_empty() {
        filled.push("hashtags");
        fallback::hashtags(request)
    } else {
        parsed.hashtags
    };
    let description = if parsed.description.is_empty() {
        filled.push("description");
        fallback::description(request)
    } else {
        parsed.description
    };

    let content = GeneratedContent {
        script,
        titles,
        hashtags,
        description,
        metadata: ContentMetadata::for_request(request, ai_model),
    };
    (content, filled)
}

/// Prompt asking for the four-section format the parser understands.
pub fn build_prompt(request: &ContentRequest) -> String {
    let ContentRequest {
        topic,
        niche,
        content_type,
        target_audience,
        tone,
    } = request;

    format!(
        "Create comprehensive {content_type} content about \"{topic}\" in the \"{niche}\" category.

Target Audience: {target_audience}
Tone: {tone}

Please provide exactly this format:

SCRIPT:
[Write a 300-450 word engaging script with clear introduction, 3-4 main points, and strong conclusion. Include [PAUSE] and [EMPHASIS] markers for better delivery.]

TITLES:
1. [SEO optimized title under 60 characters]
2. [Second title variation]
3. [Third title variation]
4. [Fourth title variation]
5. [Fifth title variation]

HASHTAGS:
#hashtag1 #hashtag2 #hashtag3 #hashtag4 #hashtag5 #hashtag6 #hashtag7 #hashtag8 #hashtag9 #hashtag10 #hashtag11 #hashtag12 #hashtag13 #hashtag14 #hashtag15

DESCRIPTION:
[Write a 200-250 word engaging description with key points, timestamps, call-to-action, and SEO keywords naturally integrated]

Make it highly engaging and optimized for {content_type} platform."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FALLBACK_MODEL;
    use crate::parser::{MAX_HASHTAGS, MAX_TITLES};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    struct Canned {
        text: &'static str,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextProvider for Canned {
        fn label(&self) -> &str {
            "Canned Model"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextProvider for Failing {
        fn label(&self) -> &str {
            "Failing Model"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Api {
                status: 429,
                message: "quota".to_string(),
            })
        }
    }

    struct Hanging;

    #[async_trait]
    impl TextProvider for Hanging {
        fn label(&self) -> &str {
            "Hanging Model"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    const FULL_RESPONSE: &str = "SCRIPT:
A real script.

TITLES:
1. First
2. Second

HASHTAGS:
#one #two #three

DESCRIPTION:
A real description.";

    fn generator(provider: ProviderConfig) -> ContentGenerator {
        ContentGenerator::new(provider, Duration::from_secs(5))
    }

    fn assert_complete(content: &GeneratedContent) {
        assert!(!content.script.is_empty());
        assert!(!content.description.is_empty());
        assert!(!content.titles.is_empty() && content.titles.len() <= MAX_TITLES);
        assert!(!content.hashtags.is_empty() && content.hashtags.len() <= MAX_HASHTAGS);
        assert!(content.hashtags.iter().all(|t| t.starts_with('#')));
    }

    #[tokio::test]
    async fn test_disabled_provider_synthesizes_everything() {
        let generation = generator(ProviderConfig::Disabled)
            .generate(&ContentRequest::new("SEO", "Blogging"))
            .await;

        assert!(generation.fallback);
        assert_eq!(generation.content.metadata.ai_model, FALLBACK_MODEL);
        assert_eq!(generation.content.titles.len(), MAX_TITLES);
        assert_eq!(generation.content.hashtags.len(), MAX_HASHTAGS);
        assert_complete(&generation.content);
    }

    #[tokio::test]
    async fn test_full_provider_response_is_used() {
        let provider = Arc::new(Canned::new(FULL_RESPONSE));
        let generation = generator(ProviderConfig::Enabled(provider.clone()))
            .generate(&ContentRequest::new("SEO", "Blogging"))
            .await;

        assert!(!generation.fallback);
        assert_eq!(generation.message, SUCCESS_MESSAGE);
        assert_eq!(generation.content.script, "A real script.");
        // fewer than five titles are not padded
        assert_eq!(generation.content.titles, vec!["First", "Second"]);
        assert_eq!(generation.content.hashtags, vec!["#one", "#two", "#three"]);
        assert_eq!(generation.content.description, "A real description.");
        assert_eq!(generation.content.metadata.ai_model, "Canned Model");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_sections_are_filled() {
        let text = "SCRIPT:\nOnly a script here.\nTITLES:\n\nHASHTAGS:\nnone";
        let generation = generator(ProviderConfig::enabled(Canned::new(text)))
            .generate(&ContentRequest::new("SEO", "Blogging"))
            .await;

        let request = ContentRequest::new("SEO", "Blogging");
        assert!(generation.fallback);
        assert_eq!(generation.message, PARTIAL_MESSAGE);
        assert_eq!(generation.content.script, "Only a script here.");
        assert_eq!(generation.content.titles, fallback::titles(&request));
        assert_eq!(generation.content.hashtags, fallback::hashtags(&request));
        assert_eq!(generation.content.description, fallback::description(&request));
        assert_eq!(generation.content.metadata.ai_model, "Canned Model");
    }

    #[tokio::test]
    async fn test_unstructured_response_falls_back_per_field() {
        let generation = generator(ProviderConfig::enabled(Canned::new("I cannot help with that.")))
            .generate(&ContentRequest::new("SEO", "Blogging"))
            .await;

        assert!(generation.fallback);
        assert_eq!(generation.content.titles.len(), MAX_TITLES);
        assert_complete(&generation.content);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let generation = generator(ProviderConfig::enabled(Failing))
            .generate(&ContentRequest::new("SEO", "Blogging"))
            .await;

        assert!(generation.fallback);
        assert_eq!(generation.message, PROVIDER_FAILED_MESSAGE);
        assert_eq!(generation.content.metadata.ai_model, FALLBACK_MODEL);
        assert_complete(&generation.content);
    }

    #[tokio::test]
    async fn test_hanging_provider_times_out() {
        let timeout = Duration::from_millis(100);
        let started = Instant::now();
        let generation = ContentGenerator::new(ProviderConfig::enabled(Hanging), timeout)
            .generate(&ContentRequest::new("SEO", "Blogging"))
            .await;

        assert!(started.elapsed() < timeout + Duration::from_secs(2));
        assert!(generation.fallback);
        assert_eq!(generation.content.metadata.ai_model, FALLBACK_MODEL);
        assert_complete(&generation.content);
    }

    #[tokio::test]
    async fn test_connection_test() {
        let disabled = generator(ProviderConfig::Disabled);
        assert!(matches!(
            disabled.test_connection(Duration::from_secs(1)).await,
            Err(ProviderError::Unavailable)
        ));

        let hanging = generator(ProviderConfig::enabled(Hanging));
        assert!(matches!(
            hanging.test_connection(Duration::from_millis(50)).await,
            Err(ProviderError::Timeout(_))
        ));

        let canned = generator(ProviderConfig::enabled(Canned::new("Hello!")));
        assert_eq!(canned.test_connection(Duration::from_secs(1)).await.unwrap(), "Hello!");
    }

    #[test]
    fn test_prompt_mentions_request_and_headers() {
        let mut request = ContentRequest::new("SEO", "Blogging");
        request.tone = "witty".to_string();
        let prompt = build_prompt(&request);

        assert!(prompt.contains("about \"SEO\" in the \"Blogging\" category"));
        assert!(prompt.contains("Tone: witty"));
        for header in ["SCRIPT:", "TITLES:", "HASHTAGS:", "DESCRIPTION:"] {
            assert!(prompt.contains(header));
        }
    }
}
