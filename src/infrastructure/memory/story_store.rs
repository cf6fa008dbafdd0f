//! In-Memory Story Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{StoreError, StoryStorePort};
use crate::domain::story::{Chapter, NewChapter, Story, StoryId};

/// 内存故事存储
///
/// 进程内有效，重启后全部丢失。编号在 DashMap 的 entry 锁内分配。
pub struct InMemoryStoryStore {
    stories: DashMap<StoryId, Story>,
}

impl InMemoryStoryStore {
    pub fn new() -> Self {
        Self {
            stories: DashMap::new(),
        }
    }
}

impl Default for InMemoryStoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryStorePort for InMemoryStoryStore {
    async fn append(&self, story_id: &StoryId, chapter: NewChapter) -> Result<Chapter, StoreError> {
        let mut story = self
            .stories
            .entry(story_id.clone())
            .or_insert_with(|| {
                tracing::info!(story_id = %story_id, "Story created");
                Story::new(story_id.clone())
            });
        let chapter = story.append(chapter).clone();
        tracing::debug!(
            story_id = %story_id,
            chapter_number = %chapter.number(),
            "Chapter appended"
        );
        Ok(chapter)
    }

    async fn history(&self, story_id: &StoryId) -> Result<Vec<Chapter>, StoreError> {
        Ok(self
            .stories
            .get(story_id)
            .map(|story| story.chapters().to_vec())
            .unwrap_or_default())
    }

    async fn count(&self, story_id: &StoryId) -> Result<usize, StoreError> {
        Ok(self
            .stories
            .get(story_id)
            .map(|story| story.chapter_count())
            .unwrap_or(0))
    }

    async fn list_ids(&self) -> Result<Vec<StoryId>, StoreError> {
        let mut ids: Vec<StoryId> = self.stories.iter().map(|e| e.key().clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }
}
