//! Story Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Chapter, ChapterNumber, NewChapter, StoryId};

/// 没有任何章节时使用的"前情提要"
pub const FIRST_CHAPTER_SENTINEL: &str = "This is the first chapter of the story.";

/// Story 聚合根
///
/// 不变量:
/// - 章节编号 = 追加时已有章节数 + 1，无空洞、无重排
/// - 章节只追加，不修改、不删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    chapters: Vec<Chapter>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// 由章节数驱动的连续性状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuity {
    /// 0 章
    Empty,
    /// n >= 1 章
    InProgress { chapters: usize },
}

impl Story {
    pub fn new(id: StoryId) -> Self {
        let now = Utc::now();
        Self {
            id,
            chapters: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 追加章节，返回分配的章节
    pub fn append(&mut self, draft: NewChapter) -> &Chapter {
        let number = self.next_chapter_number();
        self.chapters.push(Chapter::new(number, draft));
        self.updated_at = Utc::now();
        &self.chapters[self.chapters.len() - 1]
    }

    pub fn next_chapter_number(&self) -> ChapterNumber {
        ChapterNumber::after(self.chapters.len())
    }

    pub fn continuity(&self) -> Continuity {
        continuity_of(&self.chapters)
    }

    // Getters
    pub fn id(&self) -> &StoryId {
        &self.id
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// 计算章节序列的连续性状态
pub fn continuity_of(chapters: &[Chapter]) -> Continuity {
    if chapters.is_empty() {
        Continuity::Empty
    } else {
        Continuity::InProgress {
            chapters: chapters.len(),
        }
    }
}

/// 渲染前情提要
///
/// - Empty: 固定的首章提示
/// - InProgress: 按顺序拼接 "Chapter i: summary_i"
pub fn previous_chapters_summary(chapters: &[Chapter]) -> String {
    match continuity_of(chapters) {
        Continuity::Empty => FIRST_CHAPTER_SENTINEL.to_string(),
        Continuity::InProgress { .. } => chapters
            .iter()
            .map(|c| format!("Chapter {}: {}", c.number(), c.summary()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
