//! 分支校验结果解析

use super::sections::{list_entries, Sections};
use super::strict::{
    bool_field, parse_bool_text, parse_json, parse_object_with, parse_score_text, score_field,
    string_field, string_list, strip_code_fence,
};
use super::Parsed;
use crate::domain::branch::{ValidationResult, DEFAULT_COMPATIBILITY_SCORE};

pub const NO_EXPLANATION: &str = "No explanation provided";

const MARKERS: &[&str] = &[
    "is valid:",
    "valid:",
    "continuity issues:",
    "compatibility score:",
    "explanation:",
];
const IS_VALID: usize = 0;
const VALID: usize = 1;
const ISSUES: usize = 2;
const SCORE: usize = 3;
const EXPLANATION: usize = 4;

/// 模型用来表示"没有问题"的列表项
fn is_no_issue(entry: &str) -> bool {
    let lowered = entry.trim().trim_end_matches('.').to_lowercase();
    matches!(lowered.as_str(), "none" | "n/a" | "no issues" | "no continuity issues" | "-")
}

/// 解析校验结果
///
/// compatibility_score 始终位于 [0, 1]，无法解析时为 0.85；
/// is_valid 无法确定时取"没有连续性问题"。
pub fn parse_validation(raw: &str) -> Parsed<ValidationResult> {
    if let Some(value) = parse_json(raw) {
        if let Some(object) = parse_object_with(&value, &["is_valid", "compatibility_score"]) {
            let continuity_issues: Vec<String> = string_list(object.get("continuity_issues"))
                .unwrap_or_default()
                .into_iter()
                .filter(|issue| !is_no_issue(issue))
                .collect();
            let is_valid = bool_field(object.get("is_valid")).unwrap_or(continuity_issues.is_empty());
            return Parsed::Strict(ValidationResult {
                is_valid,
                continuity_issues,
                compatibility_score: score_field(object.get("compatibility_score")),
                explanation: string_field(object, "explanation")
                    .unwrap_or_else(|| NO_EXPLANATION.to_string()),
            });
        }
    }

    let body = strip_code_fence(raw);
    let sections = Sections::new(body, MARKERS);

    let continuity_issues: Vec<String> = sections
        .get(ISSUES)
        .map(list_entries)
        .unwrap_or_default()
        .into_iter()
        .filter(|issue| !is_no_issue(issue))
        .collect();

    let is_valid = sections
        .get_any(&[IS_VALID, VALID])
        .and_then(parse_bool_text)
        .unwrap_or(continuity_issues.is_empty());

    let compatibility_score = sections
        .get(SCORE)
        .and_then(parse_score_text)
        .unwrap_or(DEFAULT_COMPATIBILITY_SCORE);

    let explanation = sections
        .get(EXPLANATION)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_EXPLANATION.to_string());

    Parsed::Degraded(ValidationResult {
        is_valid,
        continuity_issues,
        compatibility_score,
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_validation() {
        let parsed = parse_validation(
            r#"{"is_valid": false, "continuity_issues": ["Mira dies too early"], "compatibility_score": 0.4, "explanation": "Breaks arc"}"#,
        );
        assert!(!parsed.is_degraded());
        let result = parsed.into_inner();
        assert!(!result.is_valid);
        assert_eq!(result.continuity_issues, vec!["Mira dies too early"]);
        assert_eq!(result.compatibility_score, 0.4);
        assert_eq!(result.explanation, "Breaks arc");
    }

    #[test]
    fn test_json_type_mismatches_are_defaulted() {
        let parsed = parse_validation(
            r#"{"is_valid": "perhaps", "continuity_issues": 3, "compatibility_score": "n/a", "explanation": 12}"#,
        );
        assert!(!parsed.is_degraded());
        let result = parsed.into_inner();
        assert!(result.is_valid);
        assert!(result.continuity_issues.is_empty());
        assert_eq!(result.compatibility_score, DEFAULT_COMPATIBILITY_SCORE);
        assert_eq!(result.explanation, NO_EXPLANATION);
    }

    #[test]
    fn test_json_score_is_clamped() {
        let result = parse_validation(r#"{"is_valid": true, "compatibility_score": 4.2}"#).into_inner();
        assert_eq!(result.compatibility_score, 1.0);
        let result = parse_validation(r#"{"is_valid": true, "compatibility_score": -3}"#).into_inner();
        assert_eq!(result.compatibility_score, 0.0);
    }

    #[test]
    fn test_bulleted_verdict_is_respected() {
        let parsed = parse_validation("- Is Valid: no\n- Compatibility Score: 0.3\n- Explanation: bad");
        assert!(parsed.is_degraded());
        let result = parsed.into_inner();
        assert!(!result.is_valid);
        assert_eq!(result.compatibility_score, 0.3);
        assert_eq!(result.explanation, "bad");
    }

    #[test]
    fn test_numbered_and_bold_labels() {
        let raw = "1. **Valid**: false\n2. **Continuity Issues:**\n- Mira forgets the key\n3. **Compatibility Score:** 40%";
        let result = parse_validation(raw).into_inner();
        assert!(!result.is_valid);
        assert_eq!(result.continuity_issues, vec!["Mira forgets the key"]);
        assert_eq!(result.compatibility_score, 0.4);

        let result = parse_validation("Valid: yes\nCompatibility Score: 8/10").into_inner();
        assert_eq!(result.compatibility_score, 0.8);
    }

    #[test]
    fn test_plain_text_validation() {
        let raw = "Is Valid: no\nContinuity Issues:\n- The flood never happens\n- Mira changes name\nCompatibility Score: 0.35\nExplanation: Too many changes.";
        let parsed = parse_validation(raw);
        assert!(parsed.is_degraded());
        let result = parsed.into_inner();
        assert!(!result.is_valid);
        assert_eq!(result.continuity_issues.len(), 2);
        assert_eq!(result.compatibility_score, 0.35);
        assert_eq!(result.explanation, "Too many changes.");
    }

    #[test]
    fn test_plain_text_out_of_range_score() {
        let result = parse_validation("Valid: yes\nCompatibility Score: 150%").into_inner();
        assert!(result.is_valid);
        assert_eq!(result.compatibility_score, 1.0);

        let result = parse_validation("Compatibility Score: excellent").into_inner();
        assert_eq!(result.compatibility_score, DEFAULT_COMPATIBILITY_SCORE);
    }

    #[test]
    fn test_no_issue_entries_are_dropped() {
        let result = parse_validation("Continuity Issues:\n- None\nCompatibility Score: 0.9").into_inner();
        assert!(result.continuity_issues.is_empty());
        assert!(result.is_valid);
    }

    #[test]
    fn test_unstructured_text_gets_defaults() {
        let result = parse_validation("I think it's fine.").into_inner();
        assert!(result.is_valid);
        assert!(result.continuity_issues.is_empty());
        assert_eq!(result.compatibility_score, DEFAULT_COMPATIBILITY_SCORE);
        assert_eq!(result.explanation, NO_EXPLANATION);
    }

    #[test]
    fn test_json_and_plain_text_have_same_shape() {
        let strict = parse_validation(
            r#"{"is_valid": true, "continuity_issues": [], "compatibility_score": 0.9, "explanation": "Consistent."}"#,
        )
        .into_inner();
        let degraded = parse_validation(
            "Is Valid: yes\nContinuity Issues:\n- none\nCompatibility Score: 0.9\nExplanation: Consistent.",
        )
        .into_inner();
        assert_eq!(strict, degraded);
    }
}
