//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AnalyzePlotHandler, GenerateBranchesHandler, GenerateChapterHandler, PreviewBranchHandler,
    SpeechStoryHandler, TranscribeAudioHandler, ValidateBranchHandler,
    // Query handlers
    GetStoryProgressHandler, ListStoriesHandler,
    // Ports
    BranchRegistryPort, StoryStorePort, TextGeneratorPort, TranscriberPort,
};

/// 应用状态
///
/// 存储在进程启动时创建并注入，生命周期与进程相同
pub struct AppState {
    // ========== Ports ==========
    pub text_generator: Arc<dyn TextGeneratorPort>,
    pub story_store: Arc<dyn StoryStorePort>,
    pub branch_registry: Arc<dyn BranchRegistryPort>,
    pub transcriber: Arc<dyn TranscriberPort>,

    // ========== Command Handlers ==========
    pub generate_chapter_handler: Arc<GenerateChapterHandler>,
    pub generate_branches_handler: GenerateBranchesHandler,
    pub preview_branch_handler: PreviewBranchHandler,
    pub validate_branch_handler: ValidateBranchHandler,
    pub analyze_plot_handler: AnalyzePlotHandler,
    pub transcribe_audio_handler: TranscribeAudioHandler,
    pub speech_story_handler: SpeechStoryHandler,

    // ========== Query Handlers ==========
    pub story_progress_handler: GetStoryProgressHandler,
    pub list_stories_handler: ListStoriesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        text_generator: Arc<dyn TextGeneratorPort>,
        story_store: Arc<dyn StoryStorePort>,
        branch_registry: Arc<dyn BranchRegistryPort>,
        transcriber: Arc<dyn TranscriberPort>,
    ) -> Self {
        let generate_chapter_handler = Arc::new(GenerateChapterHandler::new(
            text_generator.clone(),
            story_store.clone(),
        ));

        Self {
            // Ports
            text_generator: text_generator.clone(),
            story_store: story_store.clone(),
            branch_registry: branch_registry.clone(),
            transcriber: transcriber.clone(),

            // Command handlers
            generate_chapter_handler: generate_chapter_handler.clone(),
            generate_branches_handler: GenerateBranchesHandler::new(
                text_generator.clone(),
                branch_registry.clone(),
            ),
            preview_branch_handler: PreviewBranchHandler::new(
                text_generator.clone(),
                branch_registry.clone(),
            ),
            validate_branch_handler: ValidateBranchHandler::new(
                text_generator.clone(),
                branch_registry.clone(),
            ),
            analyze_plot_handler: AnalyzePlotHandler::new(text_generator.clone()),
            transcribe_audio_handler: TranscribeAudioHandler::new(transcriber.clone()),
            speech_story_handler: SpeechStoryHandler::new(transcriber.clone(), generate_chapter_handler),

            // Query handlers
            story_progress_handler: GetStoryProgressHandler::new(story_store.clone()),
            list_stories_handler: ListStoriesHandler::new(story_store.clone()),
        }
    }
}
