//! Story Commands

use crate::domain::prompt::StoryParams;

/// 生成下一章命令
#[derive(Debug, Clone)]
pub struct GenerateChapter {
    /// 不提供时生成新的故事 ID
    pub story_id: Option<String>,
    pub params: StoryParams,
}
