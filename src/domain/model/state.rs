//! Model Context - 模型状态快照

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ModelKind;

/// 未指定时选中的模型
pub const DEFAULT_MODEL_KIND: &str = ModelKind::Base.as_str();

/// 后端模型子系统的当前状态
///
/// `downloaded` / `loaded_in_memory` 只由轮询器或 unload 更新，
/// `selected_kind` 只由用户显式切换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelState {
    pub available_kinds: Vec<String>,
    pub selected_kind: String,
    pub downloaded: HashMap<String, bool>,
    pub loaded_in_memory: bool,
}

impl Default for ModelState {
    fn default() -> Self {
        Self::with_selected_kind(DEFAULT_MODEL_KIND)
    }
}

impl ModelState {
    pub fn with_selected_kind(kind: impl Into<String>) -> Self {
        Self {
            available_kinds: Vec::new(),
            selected_kind: kind.into(),
            downloaded: HashMap::new(),
            loaded_in_memory: false,
        }
    }

    /// 当前选中的模型是否已下载（未知视为未下载）
    pub fn selected_is_downloaded(&self) -> bool {
        self.downloaded
            .get(&self.selected_kind)
            .copied()
            .unwrap_or(false)
    }
}
