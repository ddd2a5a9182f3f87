//! Model Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// 不在内置列表中的模型名
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model kind: {0}")]
pub struct UnknownModelKind(pub String);

/// 后端自带的模型种类
///
/// 协调器本身接受任意字符串作为模型名，这里只用于展示、默认值和启动时的提示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Tiny,
    TinyEn,
    Base,
    BaseEn,
    Small,
    SmallEn,
    Medium,
    MediumEn,
    LargeV3,
}

impl ModelKind {
    pub const ALL: [ModelKind; 9] = [
        ModelKind::Tiny,
        ModelKind::TinyEn,
        ModelKind::Base,
        ModelKind::BaseEn,
        ModelKind::Small,
        ModelKind::SmallEn,
        ModelKind::Medium,
        ModelKind::MediumEn,
        ModelKind::LargeV3,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Tiny => "Tiny",
            ModelKind::TinyEn => "TinyEn",
            ModelKind::Base => "Base",
            ModelKind::BaseEn => "BaseEn",
            ModelKind::Small => "Small",
            ModelKind::SmallEn => "SmallEn",
            ModelKind::Medium => "Medium",
            ModelKind::MediumEn => "MediumEn",
            ModelKind::LargeV3 => "LargeV3",
        }
    }

}

impl FromStr for ModelKind {
    type Err = UnknownModelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownModelKind(s.to_string()))
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
