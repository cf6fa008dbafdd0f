//! Speech Commands

use crate::application::ports::AudioInput;

/// 语音转文字命令
#[derive(Debug, Clone)]
pub struct TranscribeAudio {
    pub audio: AudioInput,
}

/// 语音输入生成章节命令
#[derive(Debug, Clone)]
pub struct SpeechStory {
    pub audio: AudioInput,
    pub story_id: Option<String>,
    pub genre: Option<String>,
    pub tone: Option<String>,
}
