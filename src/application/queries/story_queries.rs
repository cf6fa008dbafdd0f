//! Story Queries

/// 获取故事进度查询
#[derive(Debug, Clone)]
pub struct GetStoryProgress {
    pub story_id: String,
}

/// 列出所有故事查询
#[derive(Debug, Clone)]
pub struct ListStories;
