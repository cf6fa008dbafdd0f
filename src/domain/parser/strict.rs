//! 严格解析层
//!
//! 从模型输出中定位 JSON 并做宽松的类型转换：字段类型不符时取默认值，
//! 而不是让整个解析失败。

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::branch::{clamp_score, DEFAULT_COMPATIBILITY_SCORE};

/// 去掉 Markdown 代码围栏，返回围栏内的文本
///
/// 没有围栏时原样返回（已 trim）
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after_fence = &trimmed[start + 3..];
    // 跳过语言标记（```json）
    let content_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
    let content = &after_fence[content_start..];
    match content.find("```") {
        Some(end) => content[..end].trim(),
        None => content.trim(),
    }
}

/// 定位 JSON 候选文本：先代码围栏，再取最外层的 {...} 或 [...]
fn json_candidate(text: &str) -> Option<&str> {
    let body = strip_code_fence(text);
    let brace = body.find('{');
    let bracket = body.find('[');

    let (open, close) = match (brace, bracket) {
        (Some(b), Some(k)) if k < b => ('[', ']'),
        (None, Some(_)) => ('[', ']'),
        (Some(_), _) => ('{', '}'),
        (None, None) => return None,
    };

    let start = body.find(open)?;
    let end = body.rfind(close)?;
    if start > end {
        return None;
    }
    Some(&body[start..=end])
}

/// 尝试把模型输出解析为 JSON
pub fn parse_json(text: &str) -> Option<Value> {
    let candidate = json_candidate(text)?;
    serde_json::from_str::<Value>(candidate).ok()
}

/// 解析为 JSON 对象，并检查必需字段全部存在
pub fn parse_object_with<'a>(value: &'a Value, required: &[&str]) -> Option<&'a Map<String, Value>> {
    let object = value.as_object()?;
    if required.iter().all(|key| object.contains_key(*key)) {
        Some(object)
    } else {
        None
    }
}

/// 非空字符串字段
pub fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 字符串列表：数组取其中的字符串（数字等标量转为文本），单个字符串视为一项
pub fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_string()]),
        _ => None,
    }
}

/// 字符串映射：对象的值若不是字符串则取其 JSON 文本
pub fn string_map(value: Option<&Value>) -> Option<BTreeMap<String, String>> {
    let object = value?.as_object()?;
    Some(
        object
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect(),
    )
}

/// 布尔字段：接受 true/false 以及 "yes"/"no" 之类的字符串
pub fn bool_field(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool_text(s),
        _ => None,
    }
}

/// 兼容度：数字或数字字符串，钳制到 [0, 1]；无法解析取默认值
pub fn score_field(value: Option<&Value>) -> f32 {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(clamp_score).unwrap_or(DEFAULT_COMPATIBILITY_SCORE),
        Some(Value::String(s)) => parse_score_text(s).unwrap_or(DEFAULT_COMPATIBILITY_SCORE),
        _ => DEFAULT_COMPATIBILITY_SCORE,
    }
}

/// 从自由文本中解析布尔值（取第一个单词）
pub fn parse_bool_text(text: &str) -> Option<bool> {
    let word: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    match word.as_str() {
        "yes" | "true" | "valid" | "y" => Some(true),
        "no" | "false" | "invalid" | "n" => Some(false),
        _ => None,
    }
}

/// 文本开头的非负小数，返回数值与其字节长度
fn leading_number(text: &str) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot && end > 0 && end + 1 < bytes.len() && bytes[end + 1].is_ascii_digit() => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    let value = text[..end].parse().ok()?;
    Some((value, end))
}

/// 从自由文本中解析兼容度
///
/// 取第一个数字；紧跟 `%` 时按百分比处理，紧跟 `/m` 时按 m 分制处理。结果钳制到 [0, 1]。
pub fn parse_score_text(text: &str) -> Option<f32> {
    let start = text.bytes().position(|b| b.is_ascii_digit())?;
    let negative = start > 0 && text.as_bytes()[start - 1] == b'-';

    let (mut value, len) = leading_number(&text[start..])?;
    if negative {
        value = -value;
    }

    let rest = text[start + len..].trim_start();
    if rest.starts_with('%') {
        value /= 100.0;
    } else if let Some(denominator) = rest.strip_prefix('/') {
        if let Some((scale, _)) = leading_number(denominator.trim_start()) {
            if scale > 0.0 {
                value /= scale;
            }
        }
    }
    Some(clamp_score(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  plain text "), "plain text");
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let value = parse_json("Here you go:\n{\"summary\": \"ok\"}\nThanks!").unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn test_parse_json_prefers_array_when_first() {
        let value = parse_json("[{\"content\": \"a\"}]").unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn test_parse_json_rejects_prose() {
        assert!(parse_json("Once upon a time there was no JSON.").is_none());
        assert!(parse_json("A {broken json").is_none());
    }

    #[test]
    fn test_required_fields() {
        let value = json!({"a": 1, "b": null});
        assert!(parse_object_with(&value, &["a", "b"]).is_some());
        assert!(parse_object_with(&value, &["a", "c"]).is_none());
    }

    #[test]
    fn test_string_list_coercion() {
        assert_eq!(
            string_list(Some(&json!(["x", 2, {"no": 1}, " "]))),
            Some(vec!["x".to_string(), "2".to_string()])
        );
        assert_eq!(string_list(Some(&json!("single"))), Some(vec!["single".to_string()]));
        assert_eq!(string_list(Some(&json!(42))), None);
    }

    #[test]
    fn test_score_field() {
        assert_eq!(score_field(Some(&json!(0.4))), 0.4);
        assert_eq!(score_field(Some(&json!(7))), 1.0);
        assert_eq!(score_field(Some(&json!(-1))), 0.0);
        assert_eq!(score_field(Some(&json!("0.25"))), 0.25);
        assert_eq!(score_field(Some(&json!("high"))), DEFAULT_COMPATIBILITY_SCORE);
        assert_eq!(score_field(None), DEFAULT_COMPATIBILITY_SCORE);
    }

    #[test]
    fn test_parse_score_text() {
        assert_eq!(parse_score_text("0.9 (very compatible)"), Some(0.9));
        assert_eq!(parse_score_text("about 80%"), Some(0.8));
        assert_eq!(parse_score_text("-0.3"), Some(0.0));
        assert_eq!(parse_score_text("12"), Some(1.0));
        assert_eq!(parse_score_text("unknown"), None);
        assert_eq!(parse_score_text("8/10"), Some(0.8));
        assert_eq!(parse_score_text("4 / 5 overall"), Some(0.8));
        assert_eq!(parse_score_text("7/0"), Some(1.0));
    }

    #[test]
    fn test_parse_bool_text() {
        assert_eq!(parse_bool_text("Yes, it works"), Some(true));
        assert_eq!(parse_bool_text("false"), Some(false));
        assert_eq!(parse_bool_text("maybe"), None);
    }
}
