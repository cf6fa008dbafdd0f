//! Transcriber Port - 语音转写抽象

use async_trait::async_trait;
use thiserror::Error;

/// 转写错误
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// 音频中没有可识别的语音
    #[error("Could not understand audio")]
    Unintelligible,

    /// 转写服务不可用或返回错误
    #[error("Speech service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid audio: {0}")]
    InvalidAudio(String),
}

/// 待转写的音频（整段在内存中）
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: Option<String>,
}

/// Transcriber Port
#[async_trait]
pub trait TranscriberPort: Send + Sync {
    /// 返回非空的转写文本
    async fn transcribe(&self, audio: AudioInput) -> Result<String, TranscriptionError>;
}
