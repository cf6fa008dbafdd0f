//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 故事聚合管理（按顺序累积的章节）
//! - 章节实体
//! - 连续性状态（空故事 / 进行中）

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::{continuity_of, previous_chapters_summary, Continuity, Story, FIRST_CHAPTER_SENTINEL};
pub use entities::{Chapter, NewChapter};
pub use errors::StoryError;
pub use value_objects::{ChapterNumber, StoryId, MAX_STORY_ID_LEN};
