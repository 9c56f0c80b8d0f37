//! Template-based content used when the AI provider cannot deliver.
//!
//! Every function here is pure: the same request always yields the same text.

use crate::models::{ContentMetadata, ContentRequest, GeneratedContent};

/// `metadata.aiModel` label for fully synthesized content.
pub const FALLBACK_MODEL: &str = "Fallback System";

const GENERIC_HASHTAGS: [&str; 12] = [
    "#content",
    "#creator",
    "#viral",
    "#trending",
    "#tips",
    "#tutorial",
    "#guide",
    "#howto",
    "#success",
    "#motivation",
    "#education",
    "#learning",
];

/// Synthesize every field for `request`.
pub fn synthesize(request: &ContentRequest) -> GeneratedContent {
    GeneratedContent {
        script: script(request),
        titles: titles(request),
        hashtags: hashtags(request),
        description: description(request),
        metadata: ContentMetadata::for_request(request, FALLBACK_MODEL),
    }
}

/// `#` followed by `value` with all whitespace removed.
fn tag(value: &str) -> String {
    let compact: String = value.split_whitespace().collect();
    format!("#{}", compact)
}

pub fn script(request: &ContentRequest) -> String {
    let ContentRequest {
        topic,
        niche,
        target_audience,
        ..
    } = request;

    format!(
        "Welcome to our complete guide to {niche}!

[EMPHASIS] This is exactly what you need to know [EMPHASIS] to get started with {topic}.

Today we're going deep into {niche}, and this one is made for a {target_audience} audience. By the end you'll see {topic} in a completely new way.

[PAUSE] Let's start with the fundamentals. [PAUSE]

First, understanding {niche} matters because it shapes how you approach {topic}. Most people skip this connection, and it's the foundation everything else is built on.

Second, the practical applications are everywhere. Whether you're just starting out or you've been at it for a while, these strategies will take your {topic} results to the next level.

Third, let's talk about the common mistakes. They show up again and again, and every one of them is avoidable once you know what to look for.

[EMPHASIS] Here's the key insight [EMPHASIS]: success in {niche} comes from consistent action and smart strategy, not from knowledge alone.

Finally, your next steps are simple. Start applying these ideas today and you'll see results sooner than you expect.

What's your biggest challenge with {topic}? Tell me in the comments, and subscribe for more {niche} content that actually works.

[PAUSE] Until next time, keep creating! [PAUSE]"
    )
}

pub fn titles(request: &ContentRequest) -> Vec<String> {
    let ContentRequest { topic, niche, .. } = request;

    vec![
        format!("Ultimate {niche} Guide: Master {topic} Fast"),
        format!("{topic} Secrets: What Nobody Tells You About {niche}"),
        format!("How to Dominate {niche} with {topic} (Step by Step)"),
        format!("{niche} Breakthrough: {topic} Made Simple"),
        format!("The Truth About {topic} in {niche} (Must Watch)"),
    ]
}

pub fn hashtags(request: &ContentRequest) -> Vec<String> {
    [
        tag(&request.niche),
        tag(&request.topic),
        tag(&request.content_type),
    ]
    .into_iter()
    .chain(GENERIC_HASHTAGS.iter().map(|t| t.to_string()))
    .collect()
}

pub fn description(request: &ContentRequest) -> String {
    let ContentRequest {
        topic,
        niche,
        content_type,
        ..
    } = request;
    let (niche_tag, topic_tag, type_tag) = (tag(niche), tag(topic), tag(content_type));

    format!(
        "🔥 Ready to master {topic} in {niche}? This guide covers everything you need to know!

In this {content_type}, you'll discover:
✅ Essential {niche} fundamentals
✅ Practical {topic} strategies
✅ Common mistakes to avoid
✅ Pro tips for success

📍 Timestamps:
0:00 Introduction
1:30 {niche} Basics
3:45 {topic} Deep Dive
6:20 Practical Examples
8:15 Next Steps

💡 Found this helpful? Like, subscribe, and hit the bell for more {niche} content!

🔗 Useful Links:
- Free {niche} Resources: [Link]
- {topic} Tools: [Link]
- Community: [Link]

{niche_tag} {topic_tag} {type_tag}"
    )
}
