//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGenerator、StoryStore、BranchRegistry、Transcriber）
//! - commands: CQRS 命令及处理器（连续性编排在 GenerateChapterHandler 中）
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Story commands
    GenerateChapter,
    // Branch commands
    AnalyzePlot,
    GenerateBranches,
    PreviewBranch,
    ValidateBranch,
    // Speech commands
    SpeechStory,
    TranscribeAudio,
    // Handlers
    handlers::{
        AnalyzePlotHandler, GenerateBranchesHandler, GenerateChapterHandler, GenerateChapterResponse,
        PreviewBranchHandler, SpeechStoryHandler, TranscribeAudioHandler, TranscriptionResponse,
        ValidateBranchHandler, SUMMARY_UNAVAILABLE,
    },
};

pub use error::ApplicationError;

pub use ports::{
    AudioInput, BranchRecord, BranchRegistryPort, GenerationError, StoreError, StoryStorePort,
    TextGeneratorPort, TranscriberPort, TranscriptionError,
};

pub use queries::{
    GetStoryProgress,
    ListStories,
    // Handlers
    handlers::{ChapterInfo, GetStoryProgressHandler, ListStoriesHandler, StoryOverview, StoryProgress},
};
