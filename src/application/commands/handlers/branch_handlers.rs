//! Branch Command Handlers
//!
//! 分支按请求生成并登记，预览与校验按 (story_id, branch_id) 找回。
//! 分支从不写入章节历史。

use std::sync::Arc;

use crate::application::commands::{GenerateBranches, PreviewBranch, ValidateBranch};
use crate::application::error::ApplicationError;
use crate::application::ports::{BranchRecord, BranchRegistryPort, TextGeneratorPort};
use crate::domain::branch::{AlternativeBranch, BranchError, BranchId, BranchPreview, ValidationResult};
use crate::domain::parser::{parse_alternatives, parse_validation};
use crate::domain::prompt::{branch_prompt, validation_prompt, BranchParams, ValidationParams};
use crate::domain::story::StoryId;

// ============================================================================
// GenerateBranches
// ============================================================================

/// GenerateBranches Handler
pub struct GenerateBranchesHandler {
    generator: Arc<dyn TextGeneratorPort>,
    registry: Arc<dyn BranchRegistryPort>,
}

impl GenerateBranchesHandler {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, registry: Arc<dyn BranchRegistryPort>) -> Self {
        Self { generator, registry }
    }

    /// 生成最多 3 个替代分支并登记
    pub async fn handle(&self, command: GenerateBranches) -> Result<Vec<AlternativeBranch>, ApplicationError> {
        let story_id = StoryId::parse(command.story_id)?;
        if command.chapter_content.trim().is_empty() {
            return Err(BranchError::EmptyChapterContent.into());
        }

        let prompt = branch_prompt(&BranchParams {
            original_content: &command.chapter_content,
            story_context: command.story_context.as_deref(),
            preserved_elements: &command.preserved_elements,
        });

        let raw = self.generator.generate(&prompt).await?;
        let parsed = parse_alternatives(&raw, &command.preserved_elements);
        if parsed.is_degraded() {
            tracing::debug!(story_id = %story_id, "Alternatives parsed from plain text");
        }
        let branches = parsed.into_inner();

        for branch in &branches {
            self.registry
                .register(BranchRecord {
                    story_id: story_id.clone(),
                    chapter_id: command.chapter_id.clone(),
                    branch: branch.clone(),
                    original_content: command.chapter_content.clone(),
                    story_context: command.story_context.clone(),
                    preserved_elements: command.preserved_elements.clone(),
                })
                .await;
        }

        tracing::info!(
            story_id = %story_id,
            chapter_id = %command.chapter_id,
            count = branches.len(),
            "Alternative branches generated"
        );

        Ok(branches)
    }
}

// ============================================================================
// ValidateBranch / PreviewBranch
// ============================================================================

async fn find_branch(
    registry: &dyn BranchRegistryPort,
    story_id: &str,
    branch_id: &str,
) -> Result<BranchRecord, ApplicationError> {
    let story = StoryId::parse(story_id)?;
    let branch = BranchId::from_string(branch_id);
    registry
        .find(&story, &branch)
        .await
        .ok_or_else(|| ApplicationError::not_found("Branch", branch_id))
}

/// 以登记时的原文校验分支
async fn validate_record(
    generator: &dyn TextGeneratorPort,
    record: &BranchRecord,
) -> Result<ValidationResult, ApplicationError> {
    let prompt = validation_prompt(&ValidationParams {
        original_content: &record.original_content,
        branch_content: &record.branch.content,
        preserved_elements: &record.preserved_elements,
    });

    let raw = generator.generate(&prompt).await?;
    let parsed = parse_validation(&raw);
    if parsed.is_degraded() {
        tracing::debug!(branch_id = %record.branch.id, "Validation parsed from plain text");
    }
    Ok(parsed.into_inner())
}

/// ValidateBranch Handler
pub struct ValidateBranchHandler {
    generator: Arc<dyn TextGeneratorPort>,
    registry: Arc<dyn BranchRegistryPort>,
}

impl ValidateBranchHandler {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, registry: Arc<dyn BranchRegistryPort>) -> Self {
        Self { generator, registry }
    }

    pub async fn handle(&self, command: ValidateBranch) -> Result<ValidationResult, ApplicationError> {
        let record = find_branch(self.registry.as_ref(), &command.story_id, &command.branch_id).await?;
        let result = validate_record(self.generator.as_ref(), &record).await?;

        tracing::info!(
            story_id = %record.story_id,
            branch_id = %record.branch.id,
            is_valid = result.is_valid,
            compatibility_score = result.compatibility_score,
            "Branch validated"
        );

        Ok(result)
    }
}

/// PreviewBranch Handler
pub struct PreviewBranchHandler {
    generator: Arc<dyn TextGeneratorPort>,
    registry: Arc<dyn BranchRegistryPort>,
}

impl PreviewBranchHandler {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, registry: Arc<dyn BranchRegistryPort>) -> Self {
        Self { generator, registry }
    }

    /// 分支的摘要与差异，加上校验得到的连续性问题和兼容度
    pub async fn handle(&self, command: PreviewBranch) -> Result<BranchPreview, ApplicationError> {
        let record = find_branch(self.registry.as_ref(), &command.story_id, &command.branch_id).await?;
        let validation = validate_record(self.generator.as_ref(), &record).await?;

        tracing::info!(
            story_id = %record.story_id,
            branch_id = %record.branch.id,
            "Branch previewed"
        );

        Ok(BranchPreview::from_validation(&record.branch, validation))
    }
}
