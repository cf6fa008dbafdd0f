//! Speech Command Handlers
//!
//! 音频整段在内存中转发给转写服务，不写临时文件。

use std::sync::Arc;

use super::{GenerateChapterHandler, GenerateChapterResponse};
use crate::application::commands::{GenerateChapter, SpeechStory, TranscribeAudio};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioInput, TranscriberPort};
use crate::domain::speech_input::story_params_from_transcript;

async fn transcribe(transcriber: &dyn TranscriberPort, audio: AudioInput) -> Result<String, ApplicationError> {
    if audio.data.is_empty() {
        return Err(ApplicationError::validation("Audio file is empty"));
    }

    let size = audio.data.len();
    let file_name = audio.file_name.clone();
    let text = transcriber.transcribe(audio).await.map_err(|e| {
        tracing::warn!(file_name = %file_name, size = size, error = %e, "Transcription failed");
        ApplicationError::from(e)
    })?;

    tracing::info!(file_name = %file_name, size = size, text_len = text.len(), "Audio transcribed");
    Ok(text)
}

/// 转写响应
#[derive(Debug, Clone)]
pub struct TranscriptionResponse {
    pub text: String,
}

/// TranscribeAudio Handler
pub struct TranscribeAudioHandler {
    transcriber: Arc<dyn TranscriberPort>,
}

impl TranscribeAudioHandler {
    pub fn new(transcriber: Arc<dyn TranscriberPort>) -> Self {
        Self { transcriber }
    }

    pub async fn handle(&self, command: TranscribeAudio) -> Result<TranscriptionResponse, ApplicationError> {
        let text = transcribe(self.transcriber.as_ref(), command.audio).await?;
        Ok(TranscriptionResponse { text })
    }
}

/// SpeechStory Handler - 语音描述转为故事参数后生成下一章
pub struct SpeechStoryHandler {
    transcriber: Arc<dyn TranscriberPort>,
    chapters: Arc<GenerateChapterHandler>,
}

impl SpeechStoryHandler {
    pub fn new(transcriber: Arc<dyn TranscriberPort>, chapters: Arc<GenerateChapterHandler>) -> Self {
        Self { transcriber, chapters }
    }

    pub async fn handle(&self, command: SpeechStory) -> Result<GenerateChapterResponse, ApplicationError> {
        let transcript = transcribe(self.transcriber.as_ref(), command.audio).await?;

        let params = story_params_from_transcript(
            &transcript,
            command.genre.as_deref(),
            command.tone.as_deref(),
        )
        .ok_or(ApplicationError::TranscriptionUnintelligible)?;

        tracing::debug!(
            main_character = %params.main_character,
            setting = %params.setting,
            "Story parameters extracted from speech"
        );

        self.chapters
            .handle(GenerateChapter {
                story_id: command.story_id,
                params,
            })
            .await
    }
}
