//! Story Store Port - 故事章节存储
//!
//! 章节只追加；编号由存储在追加时分配（已有章节数 + 1）。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::story::{Chapter, NewChapter, StoryId};

/// 存储错误
///
/// 内存实现从不返回错误；该类型留给持久化存储的实现使用
#[derive(Debug, Error)]
pub enum StoreError {
    /// 后端读写失败（映射为 500）
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Story Store Port
#[async_trait]
pub trait StoryStorePort: Send + Sync {
    /// 追加章节，返回带编号的章节；故事不存在时隐式创建
    async fn append(&self, story_id: &StoryId, chapter: NewChapter) -> Result<Chapter, StoreError>;

    /// 按编号顺序返回全部章节（可能为空）
    async fn history(&self, story_id: &StoryId) -> Result<Vec<Chapter>, StoreError>;

    /// 章节数
    async fn count(&self, story_id: &StoryId) -> Result<usize, StoreError>;

    /// 所有已有章节的故事
    async fn list_ids(&self) -> Result<Vec<StoryId>, StoreError>;
}
