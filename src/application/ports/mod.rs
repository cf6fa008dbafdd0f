//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod branch_registry;
mod story_store;
mod text_generator;
mod transcriber;

pub use branch_registry::{BranchRecord, BranchRegistryPort};
pub use story_store::{StoreError, StoryStorePort};
pub use text_generator::{GenerationError, TextGeneratorPort};
pub use transcriber::{AudioInput, TranscriberPort, TranscriptionError};
