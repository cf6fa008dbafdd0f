//! 章节与摘要解析

use super::sections::{clean_entry, Sections};
use super::strict::{parse_json, parse_object_with, string_field, strip_code_fence};
use super::Parsed;

const CHAPTER_MARKERS: &[&str] = &["title:", "content:"];
const TITLE: usize = 0;
const CONTENT: usize = 1;

const SUMMARY_MARKERS: &[&str] = &["summary:"];

/// 解析出的章节文本
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterText {
    pub title: Option<String>,
    pub content: String,
}

/// 解析章节
///
/// 原始文本非空时，content 一定非空。
pub fn parse_chapter(raw: &str) -> Parsed<ChapterText> {
    if let Some(value) = parse_json(raw) {
        if let Some(object) = parse_object_with(&value, &["content"]) {
            if let Some(content) = string_field(object, "content") {
                return Parsed::Strict(ChapterText {
                    title: string_field(object, "title"),
                    content,
                });
            }
        }
    }

    let body = strip_code_fence(raw);
    let sections = Sections::new(body, CHAPTER_MARKERS);
    let title = sections
        .get(TITLE)
        .and_then(|t| t.lines().next())
        .map(clean_entry)
        .filter(|t| !t.is_empty());

    let content = match sections.get(CONTENT) {
        Some(content) if !content.is_empty() => content.to_string(),
        _ => without_title_line(body),
    };
    let content = if content.is_empty() {
        raw.trim().to_string()
    } else {
        content
    };

    Parsed::Degraded(ChapterText { title, content })
}

/// 去掉第一行的 `Title:` 行
fn without_title_line(body: &str) -> String {
    let mut lines = body.lines();
    match lines.clone().next() {
        Some(first) if !Sections::new(first, &[CHAPTER_MARKERS[TITLE]]).is_empty() => {
            lines.next();
            lines.collect::<Vec<_>>().join("\n").trim().to_string()
        }
        _ => body.trim().to_string(),
    }
}

/// 解析摘要；无法得到非空文本时返回 None
pub fn parse_summary(raw: &str) -> Parsed<Option<String>> {
    if let Some(value) = parse_json(raw) {
        if let Some(object) = parse_object_with(&value, &["summary"]) {
            return Parsed::Strict(string_field(object, "summary"));
        }
    }

    let body = strip_code_fence(raw);
    let sections = Sections::new(body, SUMMARY_MARKERS);
    let summary = sections.get(0).unwrap_or(body).trim();
    Parsed::Degraded((!summary.is_empty()).then(|| summary.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prose_chapter() {
        let parsed = parse_chapter("The rain fell on the drowned city.\n\nMira woke.");
        assert!(parsed.is_degraded());
        assert_eq!(parsed.value().content, "The rain fell on the drowned city.\n\nMira woke.");
        assert_eq!(parsed.value().title, None);
    }

    #[test]
    fn test_json_chapter() {
        let parsed = parse_chapter("```json\n{\"title\": \"Rain\", \"content\": \"It rained.\"}\n```");
        assert!(!parsed.is_degraded());
        assert_eq!(parsed.value().title.as_deref(), Some("Rain"));
        assert_eq!(parsed.value().content, "It rained.");
    }

    #[test]
    fn test_marked_chapter() {
        let parsed = parse_chapter("Title: **Rain**\nContent:\nIt rained all night.");
        assert_eq!(parsed.value().title.as_deref(), Some("Rain"));
        assert_eq!(parsed.value().content, "It rained all night.");
    }

    #[test]
    fn test_title_line_without_content_marker() {
        let parsed = parse_chapter("Title: Rain\nIt rained all night.");
        assert_eq!(parsed.value().title.as_deref(), Some("Rain"));
        assert_eq!(parsed.value().content, "It rained all night.");
    }

    #[test]
    fn test_content_never_empty() {
        let parsed = parse_chapter("Title: Only a title");
        assert_eq!(parsed.value().content, "Title: Only a title");
    }

    #[test]
    fn test_json_missing_content_falls_back() {
        let parsed = parse_chapter("{\"title\": \"x\"}");
        assert!(parsed.is_degraded());
    }

    #[test]
    fn test_summary_variants() {
        assert_eq!(
            parse_summary("{\"summary\": \"Mira leaves.\"}"),
            Parsed::Strict(Some("Mira leaves.".to_string()))
        );
        assert_eq!(
            parse_summary("Summary: Mira leaves."),
            Parsed::Degraded(Some("Mira leaves.".to_string()))
        );
        assert_eq!(
            parse_summary("Mira leaves the city."),
            Parsed::Degraded(Some("Mira leaves the city.".to_string()))
        );
        assert_eq!(parse_summary("   "), Parsed::Degraded(None));
    }
}
