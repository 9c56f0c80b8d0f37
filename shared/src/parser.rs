//! Extraction of the four labelled sections from provider text.

use std::sync::OnceLock;

use regex::Regex;

pub const MAX_TITLES: usize = 5;
pub const MAX_HASHTAGS: usize = 15;

/// Sections recovered from provider text. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSections {
    pub script: String,
    pub titles: Vec<String>,
    pub hashtags: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Script,
    Titles,
    Hashtags,
    Description,
}

impl Section {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "SCRIPT" => Some(Section::Script),
            "TITLES" => Some(Section::Titles),
            "HASHTAGS" => Some(Section::Hashtags),
            "DESCRIPTION" => Some(Section::Description),
            _ => None,
        }
    }
}

// Line-anchored header, tolerating markdown decoration such as `**SCRIPT:**` or `## Titles:`.
fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"(?im)^[ \t*_#]*(script|titles|hashtags|description)[ \t]*:[*_]*")
            .expect("section header pattern is valid")
    })
}

fn title_numbering() -> &'static Regex {
    static NUMBERING: OnceLock<Regex> = OnceLock::new();
    NUMBERING.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("title numbering pattern is valid"))
}

/// Split provider text into its sections.
///
/// Never fails: a section whose header is absent, or whose body is empty after
/// post-processing, comes back empty.
pub fn parse_sections(text: &str) -> ParsedSections {
    // (section, body start, header start). Only the first header of each label
    // counts; a repeated label is ordinary text inside the current section.
    let mut headers: Vec<(Section, usize, usize)> = Vec::new();
    for caps in header_pattern().captures_iter(text) {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(section) = Section::from_label(label.as_str()) else {
            continue;
        };
        if headers.iter().all(|(seen, _, _)| *seen != section) {
            headers.push((section, whole.end(), whole.start()));
        }
    }

    let body = |wanted: Section| section_body(text, &headers, wanted);

    ParsedSections {
        script: body(Section::Script).map(str::trim).unwrap_or_default().to_string(),
        titles: body(Section::Titles).map(parse_titles).unwrap_or_default(),
        hashtags: body(Section::Hashtags).map(parse_hashtags).unwrap_or_default(),
        description: body(Section::Description)
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    }
}

fn section_body<'a>(
    text: &'a str,
    headers: &[(Section, usize, usize)],
    wanted: Section,
) -> Option<&'a str> {
    let index = headers.iter().position(|(section, _, _)| *section == wanted)?;
    let start = headers[index].1;
    let end = headers
        .get(index + 1)
        .map(|(_, _, header_start)| *header_start)
        .unwrap_or(text.len());
    Some(&text[start..end])
}

fn parse_titles(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| title_numbering().replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_TITLES)
        .collect()
}

fn parse_hashtags(body: &str) -> Vec<String> {
    body.split_whitespace()
        .filter(|tag| tag.starts_with('#'))
        .take(MAX_HASHTAGS)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "SCRIPT:
Welcome back! Today we talk about SEO.
[PAUSE] Let's go.

TITLES:
1. SEO for Bloggers
2. Rank Higher Today
3. The SEO Checklist

HASHTAGS:
#seo #blogging #growth

DESCRIPTION:
Everything you need to rank your blog.
0:00 Intro";

    #[test]
    fn test_parses_all_sections_verbatim() {
        let parsed = parse_sections(WELL_FORMED);

        assert_eq!(
            parsed.script,
            "Welcome back! Today we talk about SEO.\n[PAUSE] Let's go."
        );
        assert_eq!(
            parsed.titles,
            vec!["SEO for Bloggers", "Rank Higher Today", "The SEO Checklist"]
        );
        assert_eq!(parsed.hashtags, vec!["#seo", "#blogging", "#growth"]);
        assert_eq!(
            parsed.description,
            "Everything you need to rank your blog.\n0:00 Intro"
        );
    }

    #[test]
    fn test_headers_are_required_anchors() {
        let parsed = parse_sections(WELL_FORMED);
        assert_eq!(parse_sections(&parsed.script), ParsedSections::default());
        assert_eq!(parse_sections(""), ParsedSections::default());
    }

    #[test]
    fn test_headers_are_case_insensitive_and_may_be_decorated() {
        let text = "**Script:**\nHello there\n## titles:\n1. One\nHashtags: #a #b\ndescription:Done";
        let parsed = parse_sections(text);

        assert_eq!(parsed.script, "Hello there");
        assert_eq!(parsed.titles, vec!["One"]);
        assert_eq!(parsed.hashtags, vec!["#a", "#b"]);
        assert_eq!(parsed.description, "Done");
    }

    #[test]
    fn test_header_words_inside_prose_do_not_split() {
        let text = "SCRIPT:\nGreat titles: they matter.\nTITLES:\n1. Only one";
        let parsed = parse_sections(text);

        assert_eq!(parsed.script, "Great titles: they matter.");
        assert_eq!(parsed.titles, vec!["Only one"]);
    }

    #[test]
    fn test_repeated_label_stays_in_description() {
        let text = "SCRIPT:\nHi\nTITLES:\n1. One\nHASHTAGS:\n#a #b\nDESCRIPTION:\nGreat video about SEO.\n\nHashtags: #seo #blog\nSubscribe!";
        let parsed = parse_sections(text);

        assert_eq!(
            parsed.description,
            "Great video about SEO.\n\nHashtags: #seo #blog\nSubscribe!"
        );
        assert_eq!(parsed.hashtags, vec!["#a", "#b"]);
    }

    #[test]
    fn test_repeated_label_does_not_end_earlier_section() {
        let text = "SCRIPT:\nIntro\nScript: take two\nTITLES:\n1. One";
        let parsed = parse_sections(text);

        assert_eq!(parsed.script, "Intro\nScript: take two");
        assert_eq!(parsed.titles, vec!["One"]);
    }

    #[test]
    fn test_sections_out_of_order() {
        let text = "DESCRIPTION:\nFirst\nSCRIPT:\nSecond";
        let parsed = parse_sections(text);

        assert_eq!(parsed.description, "First");
        assert_eq!(parsed.script, "Second");
        assert!(parsed.titles.is_empty());
    }

    #[test]
    fn test_titles_truncated_to_five() {
        let text = "TITLES:\n1. a\n2. b\n\n3. c\n4. d\n5. e\n6. f\n7. g";
        let parsed = parse_sections(text);
        assert_eq!(parsed.titles, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_hashtags_filtered_and_truncated() {
        let tags: Vec<String> = (1..=20).map(|i| format!("#tag{}", i)).collect();
        let text = format!("HASHTAGS:\nnot-a-tag {}\n  ", tags.join(" "));
        let parsed = parse_sections(&text);

        assert_eq!(parsed.hashtags.len(), MAX_HASHTAGS);
        assert_eq!(parsed.hashtags[0], "#tag1");
        assert!(parsed.hashtags.iter().all(|t| t.starts_with('#')));
    }

    #[test]
    fn test_empty_sections_stay_empty() {
        let text = "SCRIPT:\n\nTITLES:\n\nHASHTAGS:\nno tags here\nDESCRIPTION:\n   ";
        assert_eq!(parse_sections(text), ParsedSections::default());
    }
}
