//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：章节生成、分支生成与校验、情节分析、语音输入

mod branch_commands;
mod speech_commands;
mod story_commands;

pub mod handlers;

pub use branch_commands::*;
pub use speech_commands::*;
pub use story_commands::*;
