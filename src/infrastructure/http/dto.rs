//! Data Transfer Objects
//!
//! 请求体字段名沿用前端约定（故事参数为 camelCase），响应体为 snake_case

use serde::{Deserialize, Serialize};

use crate::application::{ChapterInfo, GenerateChapterResponse, StoryOverview, StoryProgress};
use crate::domain::branch::{ElementKind, PreservedElement};
use crate::domain::prompt::StoryParams;

// ============================================================================
// Root DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryRequest {
    #[serde(rename = "story_id", default)]
    pub story_id: Option<String>,
    pub main_character: String,
    pub setting: String,
    pub genre: String,
    pub tone: String,
    #[serde(default)]
    pub additional_details: Option<String>,
}

impl GenerateStoryRequest {
    pub fn into_parts(self) -> (Option<String>, StoryParams) {
        let story_id = self.story_id.filter(|id| !id.trim().is_empty());
        (
            story_id,
            StoryParams {
                main_character: self.main_character,
                setting: self.setting,
                genre: self.genre,
                tone: self.tone,
                additional_details: self.additional_details,
            },
        )
    }
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub story_id: String,
    pub chapter_number: u32,
    pub content: String,
    pub total_chapters: usize,
}

impl From<GenerateChapterResponse> for StoryResponse {
    fn from(r: GenerateChapterResponse) -> Self {
        Self {
            story_id: r.story_id.to_string(),
            chapter_number: r.chapter_number.value(),
            content: r.content,
            total_chapters: r.total_chapters,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterInfoResponse {
    pub chapter_number: u32,
    pub summary: String,
}

impl From<ChapterInfo> for ChapterInfoResponse {
    fn from(c: ChapterInfo) -> Self {
        Self {
            chapter_number: c.chapter_number.value(),
            summary: c.summary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoryProgressResponse {
    pub total_chapters: usize,
    pub chapters: Vec<ChapterInfoResponse>,
}

impl From<StoryProgress> for StoryProgressResponse {
    fn from(p: StoryProgress) -> Self {
        Self {
            total_chapters: p.total_chapters,
            chapters: p.chapters.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoryOverviewResponse {
    pub story_id: String,
    pub total_chapters: usize,
}

impl From<StoryOverview> for StoryOverviewResponse {
    fn from(s: StoryOverview) -> Self {
        Self {
            story_id: s.story_id.to_string(),
            total_chapters: s.total_chapters,
        }
    }
}

// ============================================================================
// Plot Analysis DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlotAnalysisRequest {
    pub story: String,
}

// ============================================================================
// Branch DTOs
// ============================================================================

/// 请求中的保留元素；importance 超出 [0, 1] 时钳制
#[derive(Debug, Deserialize)]
pub struct PreservedElementRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default = "default_importance")]
    pub importance: f32,
}

fn default_importance() -> f32 {
    1.0
}

impl PreservedElementRequest {
    pub fn into_domain(self) -> Result<PreservedElement, crate::domain::branch::BranchError> {
        let kind: ElementKind = self.kind.parse()?;
        PreservedElement::new(kind, self.name, self.importance)
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateBranchRequest {
    pub story_id: String,
    /// 前端可能传数字或字符串
    pub chapter_id: serde_json::Value,
    pub chapter_content: String,
    #[serde(default)]
    pub story_context: Option<String>,
    #[serde(default)]
    pub preserved_elements: Vec<PreservedElementRequest>,
}

impl GenerateBranchRequest {
    pub fn chapter_id(&self) -> String {
        match &self.chapter_id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_story_request_field_names() {
        let req: GenerateStoryRequest = serde_json::from_str(
            r#"{"story_id": "s1", "mainCharacter": "Mira", "setting": "City", "genre": "fantasy", "tone": "dark", "additionalDetails": "rain"}"#,
        )
        .unwrap();
        let (story_id, params) = req.into_parts();
        assert_eq!(story_id.as_deref(), Some("s1"));
        assert_eq!(params.main_character, "Mira");
        assert_eq!(params.additional_details.as_deref(), Some("rain"));
    }

    #[test]
    fn test_blank_story_id_means_new_story() {
        let req: GenerateStoryRequest = serde_json::from_str(
            r#"{"story_id": "", "mainCharacter": "Mira", "setting": "City", "genre": "fantasy", "tone": "dark"}"#,
        )
        .unwrap();
        assert_eq!(req.into_parts().0, None);
    }

    #[test]
    fn test_preserved_element_request() {
        let req: PreservedElementRequest =
            serde_json::from_str(r#"{"type": "character", "name": "Mira", "importance": 4.5}"#).unwrap();
        let element = req.into_domain().unwrap();
        assert_eq!(element.kind, ElementKind::Character);
        assert_eq!(element.importance, 1.0);

        let req: PreservedElementRequest =
            serde_json::from_str(r#"{"type": "place", "name": "City"}"#).unwrap();
        assert!(req.into_domain().is_err());
    }

    #[test]
    fn test_chapter_id_accepts_numbers() {
        let req: GenerateBranchRequest = serde_json::from_str(
            r#"{"story_id": "s1", "chapter_id": 3, "chapter_content": "text"}"#,
        )
        .unwrap();
        assert_eq!(req.chapter_id(), "3");
        assert!(req.preserved_elements.is_empty());
    }
}
