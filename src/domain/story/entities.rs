//! Story Context - Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChapterNumber, StoryError};

/// 章节 - 一次生成的叙事单元及其摘要
///
/// 不变量:
/// - number 在 Story 内唯一且连续
/// - 创建后不可修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    number: ChapterNumber,
    content: String,
    summary: String,
    created_at: DateTime<Utc>,
}

impl Chapter {
    pub(crate) fn new(number: ChapterNumber, draft: NewChapter) -> Self {
        Self {
            number,
            content: draft.content,
            summary: draft.summary,
            created_at: Utc::now(),
        }
    }

    pub fn number(&self) -> ChapterNumber {
        self.number
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 待追加的章节（编号由 Story 分配）
#[derive(Debug, Clone, PartialEq)]
pub struct NewChapter {
    pub content: String,
    pub summary: String,
}

impl NewChapter {
    pub fn new(content: impl Into<String>, summary: impl Into<String>) -> Result<Self, StoryError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(StoryError::EmptyContent);
        }
        Ok(Self {
            content,
            summary: summary.into(),
        })
    }
}
