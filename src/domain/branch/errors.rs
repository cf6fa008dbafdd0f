//! Branch Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BranchError {
    #[error("未知的保留元素类型: {0}")]
    UnknownElementKind(String),

    #[error("保留元素名称不能为空")]
    EmptyElementName,

    #[error("章节内容不能为空")]
    EmptyChapterContent,
}
