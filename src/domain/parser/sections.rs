//! 启发式解析层：基于段落标记切分文本
//!
//! 标记只在行首识别（忽略前导空白、`#`、`*`、`_`、`>` 等 Markdown 修饰和列表前缀），
//! 大小写不敏感。字段内容是该标记与其后下一个已识别标记之间的文本。

use std::collections::BTreeMap;

/// 一次标记命中
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerHit {
    /// 命中的标记在标记表中的下标
    pub marker: usize,
    /// 标记所在行的起始字节偏移
    pub line_start: usize,
    /// 标记之后内容的起始字节偏移
    pub content_start: usize,
}

fn is_decoration(c: char) -> bool {
    matches!(c, ' ' | '\t' | '#' | '*' | '_' | '>')
}

/// 行首修饰的字节长度：空白、Markdown 标记以及 `-`、`•`、`1.`、`1)` 列表前缀
fn decoration_len(line: &str) -> usize {
    let rest = line.trim_start_matches(is_decoration);
    let bullet = if let Some(after) = rest.strip_prefix('-').or_else(|| rest.strip_prefix('•')) {
        after
    } else {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let numbered = rest[digits..].strip_prefix('.').or_else(|| rest[digits..].strip_prefix(')'));
        match numbered {
            Some(after) if digits > 0 => after,
            _ => rest,
        }
    };
    line.len() - bullet.trim_start_matches(is_decoration).len()
}

/// 行首是否为该标记，返回标记在行内占用的字节数
///
/// 以 `:` 结尾的标记允许冒号前有强调符（`**Strengths**:`）；
/// 以字母结尾的标记要求后面不再紧跟字母（整词匹配）
fn match_marker(line: &str, marker: &str) -> Option<usize> {
    match marker.strip_suffix(':') {
        Some(label) => {
            let after = line.strip_prefix(label)?;
            let emphasis = after.len() - after.trim_start_matches(|c: char| c == '*' || c == '_').len();
            after[emphasis..]
                .starts_with(':')
                .then_some(label.len() + emphasis + 1)
        }
        None => {
            let after = line.strip_prefix(marker)?;
            let ends_with_word = marker.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
            let joined = after.chars().next().is_some_and(|c| c.is_alphanumeric());
            (!ends_with_word || !joined).then_some(marker.len())
        }
    }
}

/// 按文本顺序找出所有标记命中
///
/// `markers` 必须是小写 ASCII。同一行只记录一个命中（取最长的匹配）。
pub fn locate_markers(text: &str, markers: &[&str]) -> Vec<MarkerHit> {
    let mut hits = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let decorated = decoration_len(line);
        let rest = &line[decorated..];
        let lowered = rest.to_ascii_lowercase();

        let best = markers
            .iter()
            .enumerate()
            .filter_map(|(index, m)| match_marker(&lowered, m).map(|consumed| (index, m.len(), consumed)))
            .max_by_key(|&(_, len, _)| len);

        if let Some((index, _, consumed)) = best {
            let after = &rest[consumed..];
            let skipped = after.len() - after.trim_start_matches(|c: char| c == '*' || c == '_').len();
            hits.push(MarkerHit {
                marker: index,
                line_start,
                content_start: line_start + decorated + consumed + skipped,
            });
        }
    }

    hits
}

/// 已定位标记的文本
pub struct Sections<'a> {
    text: &'a str,
    hits: Vec<MarkerHit>,
}

impl<'a> Sections<'a> {
    pub fn new(text: &'a str, markers: &[&str]) -> Self {
        Self {
            text,
            hits: locate_markers(text, markers),
        }
    }

    /// 是否识别到任何标记
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// 第一个标记之前的文本
    pub fn preamble(&self) -> &'a str {
        let end = self.hits.first().map(|h| h.line_start).unwrap_or(self.text.len());
        self.text[..end].trim()
    }

    /// 标记下标为 `marker` 的第一个命中对应的字段文本
    ///
    /// 同一标记出现多次时只取第一次。
    pub fn get(&self, marker: usize) -> Option<&'a str> {
        self.get_any(&[marker])
    }

    /// 任一给定标记的第一个命中对应的字段文本
    pub fn get_any(&self, markers: &[usize]) -> Option<&'a str> {
        let position = self.hits.iter().position(|h| markers.contains(&h.marker))?;
        let hit = self.hits[position];
        let end = self
            .hits
            .get(position + 1)
            .map(|next| next.line_start)
            .unwrap_or(self.text.len());
        Some(self.text[hit.content_start..end].trim())
    }
}

/// 按分隔词切分文本，丢弃第一个分隔词之前的内容
///
/// 分隔词同样只在行首识别。返回每段（不含分隔词本身）的文本。
pub fn split_on_delimiter<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    let hits = locate_markers(text, &[delimiter]);
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let end = hits.get(i + 1).map(|n| n.line_start).unwrap_or(text.len());
            text[hit.content_start..end].trim()
        })
        .collect()
}

/// 去掉列表项前缀：`-`、`•`、`* `、`1.`、`1)`
pub fn strip_bullet(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        return Some(rest.trim());
    }
    if let Some(rest) = line.strip_prefix("* ") {
        return Some(rest.trim());
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest.trim());
        }
    }
    None
}

/// 把字段文本拆成列表项
///
/// 有列表项前缀的行优先；没有任何前缀行时每个非空行都是一项。
pub fn list_entries(section: &str) -> Vec<String> {
    let lines: Vec<&str> = section.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let bullets: Vec<String> = lines
        .iter()
        .filter_map(|l| strip_bullet(l))
        .map(clean_entry)
        .filter(|s| !s.is_empty())
        .collect();

    if !bullets.is_empty() {
        return bullets;
    }
    lines.into_iter().map(clean_entry).filter(|s| !s.is_empty()).collect()
}

/// 把字段文本拆成 `key: value` 映射
pub fn map_entries(section: &str) -> BTreeMap<String, String> {
    section
        .lines()
        .map(|l| strip_bullet(l).unwrap_or(l))
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (clean_entry(k), clean_entry(v)))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect()
}

/// 去掉首尾空白与 Markdown 强调符
pub fn clean_entry(entry: &str) -> String {
    entry.trim().trim_matches(|c: char| c == '*' || c == '_').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: &[&str] = &["summary:", "key differences:", "content:"];

    #[test]
    fn test_section_between_markers() {
        let text = "Content: The hero waits.\nSummary: Waiting.\nKey Differences:\n- slower\n- calmer";
        let sections = Sections::new(text, MARKERS);

        assert_eq!(sections.get(2), Some("The hero waits."));
        assert_eq!(sections.get(0), Some("Waiting."));
        assert_eq!(sections.get(1), Some("- slower\n- calmer"));
    }

    #[test]
    fn test_markers_are_case_insensitive_and_decorated() {
        let text = "**SUMMARY:** bold summary\n## Content: heading content";
        let sections = Sections::new(text, MARKERS);

        assert_eq!(sections.get(0), Some("bold summary"));
        assert_eq!(sections.get(2), Some("heading content"));
    }

    #[test]
    fn test_markers_after_bullets_and_numbering() {
        let text = "- Content: listed\n1. **Summary:** numbered\n2) **Key Differences**:\n- calmer";
        let sections = Sections::new(text, MARKERS);

        assert_eq!(sections.get(2), Some("listed"));
        assert_eq!(sections.get(0), Some("numbered"));
        assert_eq!(sections.get(1), Some("- calmer"));
    }

    #[test]
    fn test_colon_may_follow_emphasis() {
        let sections = Sections::new("**Summary**: bold label\n__Content__: underscored", MARKERS);
        assert_eq!(sections.get(0), Some("bold label"));
        assert_eq!(sections.get(2), Some("underscored"));
        assert!(Sections::new("Summary of events follows", MARKERS).is_empty());
    }

    #[test]
    fn test_plain_list_items_are_not_markers() {
        let sections = Sections::new("Summary: s\n- slower\n- 3.5 stars", MARKERS);
        assert_eq!(sections.get(0), Some("- slower\n- 3.5 stars"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Summary: first\nContent: body\nSummary: second";
        let sections = Sections::new(text, MARKERS);
        assert_eq!(sections.get(0), Some("first"));
    }

    #[test]
    fn test_marker_must_start_line() {
        let text = "The plot summary: is not a marker here";
        assert!(Sections::new(text, MARKERS).is_empty());
    }

    #[test]
    fn test_missing_marker() {
        let sections = Sections::new("just prose", MARKERS);
        assert_eq!(sections.get(0), None);
        assert_eq!(sections.preamble(), "just prose");
    }

    #[test]
    fn test_split_on_delimiter_discards_preamble() {
        let text = "Here are some options.\nAlternative 1: a\nAlternative 2: b\nAlternative 3: c";
        assert_eq!(split_on_delimiter(text, "alternative"), vec!["1: a", "2: b", "3: c"]);
        assert!(split_on_delimiter("no delimiter", "alternative").is_empty());
        assert!(split_on_delimiter("Alternatively, she ran.", "alternative").is_empty());
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("- item"), Some("item"));
        assert_eq!(strip_bullet("* item"), Some("item"));
        assert_eq!(strip_bullet("• item"), Some("item"));
        assert_eq!(strip_bullet("12. item"), Some("item"));
        assert_eq!(strip_bullet("3) item"), Some("item"));
        assert_eq!(strip_bullet("plain"), None);
        assert_eq!(strip_bullet("2024 was a year"), None);
    }

    #[test]
    fn test_list_entries_prefers_bullets() {
        assert_eq!(
            list_entries("Intro line\n- one\n2. two\n"),
            vec!["one".to_string(), "two".to_string()]
        );
        assert_eq!(list_entries("alpha\n\nbeta"), vec!["alpha".to_string(), "beta".to_string()]);
        assert!(list_entries("  \n ").is_empty());
    }

    #[test]
    fn test_map_entries() {
        let map = map_entries("- Exposition: a quiet village\n- **Climax**: the storm\nno colon here");
        assert_eq!(map.len(), 2);
        assert_eq!(map["Exposition"], "a quiet village");
        assert_eq!(map["Climax"], "the storm");
    }
}
