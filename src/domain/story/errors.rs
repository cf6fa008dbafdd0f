//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("无效的故事 ID: {0}")]
    InvalidStoryId(String),

    #[error("章节内容不能为空")]
    EmptyContent,
}
