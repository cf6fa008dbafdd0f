//! Speech HTTP Handlers
//!
//! multipart 上传，音频只在内存中转发

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::{AudioInput, SpeechStory, TranscribeAudio};
use crate::infrastructure::http::dto::{StoryResponse, TranscriptionResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 解析后的上传表单
#[derive(Default)]
struct SpeechForm {
    audio: Option<AudioInput>,
    story_id: Option<String>,
    genre: Option<String>,
    tone: Option<String>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

async fn read_form(mut multipart: Multipart) -> Result<SpeechForm, ApiError> {
    let mut form = SpeechForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::from_body_error(e.status(), format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "file" | "audio" => {
                let file_name = field.file_name().unwrap_or("audio.wav").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        ApiError::from_body_error(e.status(), format!("Failed to read file: {}", e))
                    })?
                    .to_vec();
                form.audio = Some(AudioInput {
                    data,
                    file_name,
                    content_type,
                });
            }
            "story_id" | "genre" | "tone" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", field_name, e)))?;
                let value = non_blank(value);
                match field_name.as_str() {
                    "story_id" => form.story_id = value,
                    "genre" => form.genre = value,
                    _ => form.tone = value,
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn require_audio(form: &mut SpeechForm) -> Result<AudioInput, ApiError> {
    form.audio
        .take()
        .ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))
}

/// 语音转文字
pub async fn speech_to_text(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut form = read_form(multipart).await?;
    let audio = require_audio(&mut form)?;

    let result = state
        .transcribe_audio_handler
        .handle(TranscribeAudio { audio })
        .await?;

    Ok(Json(TranscriptionResponse { text: result.text }))
}

/// 语音描述生成下一章
pub async fn speech_story_input(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<StoryResponse>, ApiError> {
    let mut form = read_form(multipart).await?;
    let audio = require_audio(&mut form)?;

    let result = state
        .speech_story_handler
        .handle(SpeechStory {
            audio,
            story_id: form.story_id,
            genre: form.genre,
            tone: form.tone,
        })
        .await?;

    Ok(Json(result.into()))
}
