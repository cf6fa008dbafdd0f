//! Story Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::StoryStorePort;
use crate::application::queries::{GetStoryProgress, ListStories};
use crate::domain::story::{ChapterNumber, StoryId};

/// 章节概要
#[derive(Debug, Clone)]
pub struct ChapterInfo {
    pub chapter_number: ChapterNumber,
    pub summary: String,
}

/// 故事进度
#[derive(Debug, Clone)]
pub struct StoryProgress {
    pub story_id: StoryId,
    pub total_chapters: usize,
    pub chapters: Vec<ChapterInfo>,
}

/// GetStoryProgress Handler
///
/// 未知故事返回 0 章，而不是 NotFound
pub struct GetStoryProgressHandler {
    store: Arc<dyn StoryStorePort>,
}

impl GetStoryProgressHandler {
    pub fn new(store: Arc<dyn StoryStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetStoryProgress) -> Result<StoryProgress, ApplicationError> {
        let story_id = StoryId::parse(query.story_id)?;
        let history = self.store.history(&story_id).await?;

        let chapters: Vec<ChapterInfo> = history
            .iter()
            .map(|c| ChapterInfo {
                chapter_number: c.number(),
                summary: c.summary().to_string(),
            })
            .collect();

        Ok(StoryProgress {
            story_id,
            total_chapters: chapters.len(),
            chapters,
        })
    }
}

/// 故事概览
#[derive(Debug, Clone)]
pub struct StoryOverview {
    pub story_id: StoryId,
    pub total_chapters: usize,
}

/// ListStories Handler
pub struct ListStoriesHandler {
    store: Arc<dyn StoryStorePort>,
}

impl ListStoriesHandler {
    pub fn new(store: Arc<dyn StoryStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListStories) -> Result<Vec<StoryOverview>, ApplicationError> {
        let mut stories = Vec::new();
        for story_id in self.store.list_ids().await? {
            let total_chapters = self.store.count(&story_id).await?;
            stories.push(StoryOverview {
                story_id,
                total_chapters,
            });
        }
        Ok(stories)
    }
}
