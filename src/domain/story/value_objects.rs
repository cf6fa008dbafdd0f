//! Story Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StoryError;

/// 故事 ID 的最大字节数
pub const MAX_STORY_ID_LEN: usize = 200;

/// 故事唯一标识（调用方提供的不透明字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// 生成新的故事 ID（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// 原样保留调用方的 ID；拒绝纯空白以及超过 [`MAX_STORY_ID_LEN`] 字节的 ID
    pub fn parse(id: impl Into<String>) -> Result<Self, StoryError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StoryError::InvalidStoryId(id));
        }
        if id.len() > MAX_STORY_ID_LEN {
            let head: String = id.chars().take(32).collect();
            return Err(StoryError::InvalidStoryId(format!("{}...", head)));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节编号（从 1 开始，连续）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterNumber(u32);

impl ChapterNumber {
    pub const FIRST: ChapterNumber = ChapterNumber(1);

    /// 由已有章节数计算下一个编号
    pub fn after(existing: usize) -> Self {
        Self(existing as u32 + 1)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
