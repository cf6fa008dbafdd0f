//! Branch Registry Port - 已生成分支的登记
//!
//! 预览与校验需要按 (story_id, branch_id) 找回分支及其生成时的原文。
//! 分支不会写入章节历史。

use async_trait::async_trait;

use crate::domain::branch::{AlternativeBranch, BranchId, PreservedElement};
use crate::domain::story::StoryId;

/// 登记的分支
#[derive(Debug, Clone)]
pub struct BranchRecord {
    pub story_id: StoryId,
    pub chapter_id: String,
    pub branch: AlternativeBranch,
    /// 生成分支时的原始章节内容
    pub original_content: String,
    pub story_context: Option<String>,
    pub preserved_elements: Vec<PreservedElement>,
}

/// Branch Registry Port
#[async_trait]
pub trait BranchRegistryPort: Send + Sync {
    async fn register(&self, record: BranchRecord);

    async fn find(&self, story_id: &StoryId, branch_id: &BranchId) -> Option<BranchRecord>;
}
