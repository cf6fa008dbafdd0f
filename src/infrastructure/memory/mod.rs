//! Memory Layer - In-Memory State Management
//!
//! 故事章节与已生成分支的内存状态，进程重启后丢失

mod branch_registry;
mod story_store;

pub use branch_registry::InMemoryBranchRegistry;
pub use story_store::InMemoryStoryStore;
