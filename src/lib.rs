//! Storyloom - 交互式小说 AI 后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 故事、章节与连续性
//! - Branch Context: 替代分支、保留元素与兼容性校验
//! - Prompt / Parser: 提示词构造与两级模型输出解析
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGenerator, StoryStore, BranchRegistry, Transcriber）
//! - Commands: CQRS 命令处理器（章节生成、分支、情节分析、语音输入）
//! - Queries: CQRS 查询处理器（故事进度、故事列表）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: StoryStore, BranchRegistry 内存实现
//! - Adapters: Gemini Client, HTTP Transcriber

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
