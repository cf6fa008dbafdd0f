//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{GenerationError, StoreError, TranscriptionError};
use crate::domain::branch::BranchError;
use crate::domain::story::StoryError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 模型调用失败
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// 音频无法识别
    #[error("Could not understand audio")]
    TranscriptionUnintelligible,

    /// 转写服务不可用
    #[error("Speech service unavailable: {0}")]
    TranscriptionUnavailable(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        Self::GenerationFailed(err.to_string())
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<TranscriptionError> for ApplicationError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Unintelligible => Self::TranscriptionUnintelligible,
            TranscriptionError::InvalidAudio(msg) => Self::ValidationError(msg),
            TranscriptionError::ServiceUnavailable(msg) => Self::TranscriptionUnavailable(msg),
        }
    }
}

impl From<StoryError> for ApplicationError {
    fn from(err: StoryError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<BranchError> for ApplicationError {
    fn from(err: BranchError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
