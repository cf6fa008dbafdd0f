//! Branch Context - 分支限界上下文
//!
//! 分支是某一章节在保留元素约束下的替代版本，按请求临时生成，
//! 不写入故事的章节历史。

mod errors;
mod value_objects;

pub use errors::BranchError;
pub use value_objects::{
    clamp_score, AlternativeBranch, BranchId, BranchPreview, ElementKind, PreservedElement,
    ValidationResult, DEFAULT_COMPATIBILITY_SCORE, MAX_ALTERNATIVES,
};
