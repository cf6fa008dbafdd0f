//! 替代分支解析

use serde_json::Value;

use super::sections::{clean_entry, list_entries, split_on_delimiter, Sections};
use super::strict::{parse_json, string_field, string_list};
use super::Parsed;
use crate::domain::branch::{AlternativeBranch, BranchId, PreservedElement, MAX_ALTERNATIVES};

/// 纯文本格式中每个分支前的分隔词
const ALTERNATIVE_DELIMITER: &str = "alternative";

const SEGMENT_MARKERS: &[&str] = &[
    "content:",
    "summary:",
    "key differences:",
    "preserved elements:",
];
const CONTENT: usize = 0;
const SUMMARY: usize = 1;
const KEY_DIFFERENCES: usize = 2;
const PRESERVED: usize = 3;

pub const NO_SUMMARY: &str = "No summary provided";

/// 解析替代分支，最多返回 [`MAX_ALTERNATIVES`] 个
///
/// `requested` 是请求中的保留元素：分支的保留元素只会取自这里。
pub fn parse_alternatives(raw: &str, requested: &[PreservedElement]) -> Parsed<Vec<AlternativeBranch>> {
    if let Some(branches) = parse_strict(raw, requested) {
        return Parsed::Strict(branches);
    }

    let branches = split_on_delimiter(raw, ALTERNATIVE_DELIMITER)
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .map(|segment| parse_segment(segment, requested))
        .collect();
    Parsed::Degraded(branches)
}

fn parse_strict(raw: &str, requested: &[PreservedElement]) -> Option<Vec<AlternativeBranch>> {
    let value = parse_json(raw)?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(object) => object
            .get("alternatives")
            .or_else(|| object.get("branches"))
            .and_then(Value::as_array)?,
        _ => return None,
    };

    let branches: Vec<AlternativeBranch> = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            let content = string_field(item, "content")?;
            let summary = string_field(item, "summary")?;
            let names = item.get("preserved_elements").and_then(element_names);
            Some(AlternativeBranch {
                id: BranchId::generate(),
                content,
                summary,
                key_differences: string_list(item.get("key_differences")).unwrap_or_default(),
                preserved_elements: select_preserved(requested, names.as_deref()),
            })
        })
        .take(MAX_ALTERNATIVES)
        .collect();

    if branches.is_empty() {
        None
    } else {
        Some(branches)
    }
}

/// 保留元素列表：字符串数组或 {"name": ...} 对象数组
fn element_names(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(o) => o.get("name").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect(),
    )
}

/// 从请求的保留元素中挑出被提及的那些；没有列表时全部保留
fn select_preserved(requested: &[PreservedElement], mentioned: Option<&[String]>) -> Vec<PreservedElement> {
    let Some(mentioned) = mentioned else {
        return requested.to_vec();
    };
    let mentioned: Vec<String> = mentioned.iter().map(|m| m.to_lowercase()).collect();
    requested
        .iter()
        .filter(|element| {
            let name = element.name.to_lowercase();
            mentioned.iter().any(|m| m.contains(&name))
        })
        .cloned()
        .collect()
}

fn parse_segment(segment: &str, requested: &[PreservedElement]) -> AlternativeBranch {
    let sections = Sections::new(segment, SEGMENT_MARKERS);

    let content = match sections.get(CONTENT) {
        Some(content) if !content.is_empty() => content.to_string(),
        _ => strip_heading(sections.preamble()),
    };

    let summary = sections
        .get(SUMMARY)
        .map(clean_entry)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    let key_differences = sections
        .get(KEY_DIFFERENCES)
        .map(list_entries)
        .unwrap_or_default();

    let mentioned = sections.get(PRESERVED).map(list_entries);

    AlternativeBranch {
        id: BranchId::generate(),
        content,
        summary,
        key_differences,
        preserved_elements: select_preserved(requested, mentioned.as_deref()),
    }
}

/// 去掉分隔词后的编号，例如 `1:`、`#2 -`
fn strip_heading(text: &str) -> String {
    text.trim_start_matches(|c: char| {
        c.is_ascii_digit() || c.is_whitespace() || matches!(c, '#' | ':' | '-' | '.' | ')' | '*')
    })
    .trim()
    .to_string()
}
