//! Text Generator Port - 文本生成模型抽象
//!
//! 单次调用：提示词进，原始文本出。没有重试，也没有退避。

use async_trait::async_trait;
use thiserror::Error;

/// 模型调用错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    Service(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Text Generator Port
///
/// 外部文本生成服务的抽象接口
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 执行一次生成，返回去掉首尾空白的文本
    ///
    /// 上游返回空文本时为 [`GenerationError::EmptyResponse`]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// 检查模型服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
