//! Response Parser - 模型输出解析
//!
//! 两级管线，每种结果类型形状相同：
//! 1. 严格解析：定位 JSON，检查必需字段，按字段做类型转换；
//! 2. 启发式解析：严格解析失败时按段落标记切分原始文本。
//!
//! 解析永不失败：两级都无法确定的字段取文档化的默认值，
//! 结果用 [`Parsed`] 标记来自哪一级。

mod analysis;
mod branches;
mod chapter;
mod sections;
mod strict;
mod validation;

pub use analysis::parse_plot_analysis;
pub use branches::parse_alternatives;
pub use chapter::{parse_chapter, parse_summary, ChapterText};
pub use validation::{parse_validation, NO_EXPLANATION};

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    /// 严格（JSON）解析成功
    Strict(T),
    /// 退化为启发式解析
    Degraded(T),
}

impl<T> Parsed<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Parsed::Degraded(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Parsed::Strict(v) | Parsed::Degraded(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Parsed::Strict(v) | Parsed::Degraded(v) => v,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        match self {
            Parsed::Strict(v) => Parsed::Strict(f(v)),
            Parsed::Degraded(v) => Parsed::Degraded(f(v)),
        }
    }

    /// 标签：用于日志
    pub fn tier(&self) -> &'static str {
        match self {
            Parsed::Strict(_) => "strict",
            Parsed::Degraded(_) => "degraded",
        }
    }
}
