//! Plot Analysis - 情节分析结果

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_PLOT_SUMMARY: &str = "No plot summary available";
pub const NO_STRENGTHS: &str = "No strengths identified";
pub const NO_IMPROVEMENTS: &str = "No areas for improvement identified";

/// 情节分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotAnalysis {
    pub plot_summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub narrative_structure: BTreeMap<String, String>,
    pub alternatives: BTreeMap<String, String>,
}

impl Default for PlotAnalysis {
    fn default() -> Self {
        Self {
            plot_summary: NO_PLOT_SUMMARY.to_string(),
            strengths: vec![NO_STRENGTHS.to_string()],
            areas_for_improvement: vec![NO_IMPROVEMENTS.to_string()],
            narrative_structure: BTreeMap::new(),
            alternatives: BTreeMap::new(),
        }
    }
}
