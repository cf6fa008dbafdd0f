//! HTTP Transcriber - 调用 Whisper 兼容的转写服务
//!
//! POST {url}/v1/audio/transcriptions
//! Request: multipart/form-data (file, model, language?)
//! Response: {"text": "..."}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{AudioInput, TranscriberPort, TranscriptionError};

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    #[serde(default)]
    text: String,
}

/// HTTP 转写客户端配置
#[derive(Debug, Clone)]
pub struct HttpTranscriberConfig {
    /// 转写服务基础 URL
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// 语言提示（ISO-639-1），不设置时由服务自动检测
    pub language: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTranscriberConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9000".to_string(),
            api_key: None,
            model: "whisper-1".to_string(),
            language: None,
            timeout_secs: 60,
        }
    }
}

/// HTTP 转写客户端
pub struct HttpTranscriber {
    client: Client,
    config: HttpTranscriberConfig,
}

impl HttpTranscriber {
    pub fn new(config: HttpTranscriberConfig) -> Result<Self, TranscriptionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::ServiceUnavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/v1/audio/transcriptions", self.config.url.trim_end_matches('/'))
    }

    fn form(&self, audio: AudioInput) -> Result<Form, TranscriptionError> {
        let mut part = Part::bytes(audio.data).file_name(audio.file_name);
        if let Some(content_type) = audio.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| TranscriptionError::InvalidAudio(e.to_string()))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("response_format", "json");
        if let Some(language) = &self.config.language {
            form = form.text("language", language.clone());
        }
        Ok(form)
    }
}

#[async_trait]
impl TranscriberPort for HttpTranscriber {
    async fn transcribe(&self, audio: AudioInput) -> Result<String, TranscriptionError> {
        let size = audio.data.len();
        let form = self.form(audio)?;

        tracing::debug!(url = %self.transcriptions_url(), size = size, "Sending transcription request");

        let mut request = self.client.post(self.transcriptions_url()).multipart(form);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TranscriptionError::ServiceUnavailable("Request timeout".to_string())
            } else {
                TranscriptionError::ServiceUnavailable(e.to_string())
            }
        })?;

        let status = response.status();
        // 音频本身被拒绝；其余错误（包括鉴权失败）都视为服务不可用
        if matches!(status.as_u16(), 400 | 413 | 415 | 422) {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::InvalidAudio(format!("HTTP {}: {}", status, error_text)));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::ServiceUnavailable(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TranscriptionBody = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ServiceUnavailable(format!("Invalid response: {}", e)))?;

        let text = body.text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }
        Ok(text.to_string())
    }
}
