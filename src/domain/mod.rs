//! Domain Layer - 领域层
//!
//! - Story Context: 故事与章节
//! - Branch Context: 替代分支与连续性校验
//! - 提示词构造、模型输出解析、情节分析等纯逻辑

pub mod analysis;
pub mod branch;
pub mod parser;
pub mod prompt;
pub mod speech_input;
pub mod story;
