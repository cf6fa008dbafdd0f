//! Branch Commands

use crate::domain::branch::PreservedElement;

/// 生成替代分支命令
#[derive(Debug, Clone)]
pub struct GenerateBranches {
    pub story_id: String,
    pub chapter_id: String,
    pub chapter_content: String,
    pub story_context: Option<String>,
    pub preserved_elements: Vec<PreservedElement>,
}

/// 预览分支命令
#[derive(Debug, Clone)]
pub struct PreviewBranch {
    pub story_id: String,
    pub branch_id: String,
}

/// 校验分支命令
#[derive(Debug, Clone)]
pub struct ValidateBranch {
    pub story_id: String,
    pub branch_id: String,
}

/// 情节分析命令
#[derive(Debug, Clone)]
pub struct AnalyzePlot {
    pub story: String,
}
