//! 情节分析解析

use super::sections::{list_entries, map_entries, Sections};
use super::strict::{parse_json, parse_object_with, string_field, string_list, string_map, strip_code_fence};
use super::Parsed;
use crate::domain::analysis::{PlotAnalysis, NO_IMPROVEMENTS, NO_PLOT_SUMMARY, NO_STRENGTHS};

const MARKERS: &[&str] = &[
    "plot summary:",
    "strengths:",
    "areas for improvement:",
    "narrative structure:",
    "alternatives:",
];
const PLOT_SUMMARY: usize = 0;
const STRENGTHS: usize = 1;
const IMPROVEMENTS: usize = 2;
const STRUCTURE: usize = 3;
const ALTERNATIVES: usize = 4;

fn or_sentinel(entries: Vec<String>, sentinel: &str) -> Vec<String> {
    if entries.is_empty() {
        vec![sentinel.to_string()]
    } else {
        entries
    }
}

/// 解析情节分析；缺失的字段取 [`PlotAnalysis::default`] 中的兜底值
pub fn parse_plot_analysis(raw: &str) -> Parsed<PlotAnalysis> {
    if let Some(value) = parse_json(raw) {
        if let Some(object) = parse_object_with(&value, &["plot_summary"]) {
            return Parsed::Strict(PlotAnalysis {
                plot_summary: string_field(object, "plot_summary")
                    .unwrap_or_else(|| NO_PLOT_SUMMARY.to_string()),
                strengths: or_sentinel(
                    string_list(object.get("strengths")).unwrap_or_default(),
                    NO_STRENGTHS,
                ),
                areas_for_improvement: or_sentinel(
                    string_list(object.get("areas_for_improvement")).unwrap_or_default(),
                    NO_IMPROVEMENTS,
                ),
                narrative_structure: string_map(object.get("narrative_structure")).unwrap_or_default(),
                alternatives: string_map(object.get("alternatives")).unwrap_or_default(),
            });
        }
    }

    let body = strip_code_fence(raw);
    let sections = Sections::new(body, MARKERS);

    let plot_summary = sections
        .get(PLOT_SUMMARY)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_PLOT_SUMMARY.to_string());

    Parsed::Degraded(PlotAnalysis {
        plot_summary,
        strengths: or_sentinel(
            sections.get(STRENGTHS).map(list_entries).unwrap_or_default(),
            NO_STRENGTHS,
        ),
        areas_for_improvement: or_sentinel(
            sections.get(IMPROVEMENTS).map(list_entries).unwrap_or_default(),
            NO_IMPROVEMENTS,
        ),
        narrative_structure: sections.get(STRUCTURE).map(map_entries).unwrap_or_default(),
        alternatives: sections.get(ALTERNATIVES).map(map_entries).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "PLOT SUMMARY:
Mira escapes the drowned city and finds allies.

STRENGTHS:
- Vivid setting
- Strong protagonist

AREAS FOR IMPROVEMENT:
- Pacing in chapter two

NARRATIVE STRUCTURE:
- Exposition: The flooded city
- Climax: The dam breaks

ALTERNATIVES:
- Chapter 2: Mira stays behind
";

    #[test]
    fn test_plain_text_analysis() {
        let parsed = parse_plot_analysis(PLAIN);
        assert!(parsed.is_degraded());

        let analysis = parsed.into_inner();
        assert_eq!(analysis.plot_summary, "Mira escapes the drowned city and finds allies.");
        assert_eq!(analysis.strengths, vec!["Vivid setting", "Strong protagonist"]);
        assert_eq!(analysis.areas_for_improvement, vec!["Pacing in chapter two"]);
        assert_eq!(analysis.narrative_structure["Exposition"], "The flooded city");
        assert_eq!(analysis.narrative_structure["Climax"], "The dam breaks");
        assert_eq!(analysis.alternatives["Chapter 2"], "Mira stays behind");
    }

    #[test]
    fn test_numbered_bold_headings() {
        let analysis = parse_plot_analysis("1. **Plot Summary:** Mira escapes.\n2. **Strengths:**\n- Setting").into_inner();
        assert_eq!(analysis.plot_summary, "Mira escapes.");
        assert_eq!(analysis.strengths, vec!["Setting"]);

        let analysis = parse_plot_analysis("**Plot Summary**: Mira escapes.\n**Strengths**:\n- Setting").into_inner();
        assert_eq!(analysis.plot_summary, "Mira escapes.");
        assert_eq!(analysis.strengths, vec!["Setting"]);
    }

    #[test]
    fn test_malformed_text_gets_all_defaults() {
        let parsed = parse_plot_analysis("lorem ipsum");
        assert!(parsed.is_degraded());
        assert_eq!(parsed.into_inner(), PlotAnalysis::default());
    }

    #[test]
    fn test_partial_text_keeps_found_fields() {
        let analysis = parse_plot_analysis("Strengths:\n- Dialogue").into_inner();
        assert_eq!(analysis.plot_summary, NO_PLOT_SUMMARY);
        assert_eq!(analysis.strengths, vec!["Dialogue"]);
        assert_eq!(analysis.areas_for_improvement, vec![NO_IMPROVEMENTS]);
        assert!(analysis.narrative_structure.is_empty());
    }

    #[test]
    fn test_json_analysis() {
        let raw = r#"{
            "plot_summary": "Mira escapes.",
            "strengths": ["Setting"],
            "areas_for_improvement": [],
            "narrative_structure": {"Climax": "The dam breaks", "Chapters": 2},
            "alternatives": "not a map"
        }"#;
        let parsed = parse_plot_analysis(raw);
        assert!(!parsed.is_degraded());

        let analysis = parsed.into_inner();
        assert_eq!(analysis.plot_summary, "Mira escapes.");
        assert_eq!(analysis.strengths, vec!["Setting"]);
        assert_eq!(analysis.areas_for_improvement, vec![NO_IMPROVEMENTS]);
        assert_eq!(analysis.narrative_structure["Climax"], "The dam breaks");
        assert_eq!(analysis.narrative_structure["Chapters"], "2");
        assert!(analysis.alternatives.is_empty());
    }

    #[test]
    fn test_json_and_plain_text_have_same_shape() {
        let strict = parse_plot_analysis(
            r#"{"plot_summary": "Mira escapes.", "strengths": ["Setting"], "areas_for_improvement": ["Pacing"], "narrative_structure": {"Climax": "Dam"}, "alternatives": {}}"#,
        )
        .into_inner();
        let degraded = parse_plot_analysis(
            "Plot Summary: Mira escapes.\nStrengths:\n- Setting\nAreas for Improvement:\n- Pacing\nNarrative Structure:\n- Climax: Dam",
        )
        .into_inner();
        assert_eq!(strict, degraded);
    }
}
