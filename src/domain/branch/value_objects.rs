//! Branch Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BranchError;

/// 单次请求最多返回的替代分支数
pub const MAX_ALTERNATIVES: usize = 3;

/// 兼容度无法解析时的默认值
pub const DEFAULT_COMPATIBILITY_SCORE: f32 = 0.85;

/// 将兼容度钳制到 [0, 1]，NaN 取默认值
pub fn clamp_score(score: f64) -> f32 {
    if score.is_nan() {
        return DEFAULT_COMPATIBILITY_SCORE;
    }
    score.clamp(0.0, 1.0) as f32
}

/// 分支标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(String);

impl BranchId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 保留元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Character,
    Event,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Character => "character",
            ElementKind::Event => "event",
        }
    }
}

impl std::str::FromStr for ElementKind {
    type Err = BranchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "character" => Ok(ElementKind::Character),
            "event" => Ok(ElementKind::Event),
            other => Err(BranchError::UnknownElementKind(other.to_string())),
        }
    }
}

/// 保留元素：分支生成时必须保持一致的角色或事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreservedElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    pub importance: f32,
}

impl PreservedElement {
    /// importance 超出 [0, 1] 时钳制
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        importance: f32,
    ) -> Result<Self, BranchError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(BranchError::EmptyElementName);
        }
        Ok(Self {
            kind,
            name,
            importance: clamp_score(importance as f64),
        })
    }
}

/// 替代分支
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeBranch {
    pub id: BranchId,
    pub content: String,
    pub summary: String,
    pub key_differences: Vec<String>,
    pub preserved_elements: Vec<PreservedElement>,
}

/// 分支连续性校验结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub continuity_issues: Vec<String>,
    /// 始终位于 [0, 1]
    pub compatibility_score: f32,
    pub explanation: String,
}

/// 分支预览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPreview {
    pub summary: String,
    pub key_differences: Vec<String>,
    pub continuity_issues: Vec<String>,
    pub compatibility_score: f32,
}

impl BranchPreview {
    pub fn from_validation(branch: &AlternativeBranch, validation: ValidationResult) -> Self {
        Self {
            summary: branch.summary.clone(),
            key_differences: branch.key_differences.clone(),
            continuity_issues: validation.continuity_issues,
            compatibility_score: validation.compatibility_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(1.7), 1.0);
        assert_eq!(clamp_score(-0.2), 0.0);
        assert_eq!(clamp_score(0.5), 0.5);
        assert_eq!(clamp_score(f64::NAN), DEFAULT_COMPATIBILITY_SCORE);
    }

    #[test]
    fn test_element_kind_parsing() {
        assert_eq!("Character".parse::<ElementKind>().unwrap(), ElementKind::Character);
        assert_eq!(" event ".parse::<ElementKind>().unwrap(), ElementKind::Event);
        assert!("place".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_preserved_element_clamps_importance() {
        let element = PreservedElement::new(ElementKind::Character, "Mira", 3.0).unwrap();
        assert_eq!(element.importance, 1.0);
        assert!(PreservedElement::new(ElementKind::Event, "  ", 0.5).is_err());
    }

    #[test]
    fn test_preserved_element_wire_format() {
        let element = PreservedElement::new(ElementKind::Event, "The Fall", 0.5).unwrap();
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "event");
        assert_eq!(json["name"], "The Fall");
    }
}
