//! File Picker Adapter - 预置候选路径的文件选择器
//!
//! 无界面运行时代替文件对话框：候选路径来自命令行，按扩展名过滤

use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::{FilePickerPort, PickerError};

/// 预置文件选择器
pub struct PresetFilePicker {
    candidates: Vec<String>,
}

impl PresetFilePicker {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    fn matches(path: &str, extensions: &[String]) -> bool {
        if extensions.is_empty() {
            return true;
        }
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

#[async_trait]
impl FilePickerPort for PresetFilePicker {
    async fn select_files(&self, extensions: &[String]) -> Result<Option<Vec<String>>, PickerError> {
        // 没有候选等同于用户取消
        if self.candidates.is_empty() {
            return Ok(None);
        }

        let (selected, skipped): (Vec<String>, Vec<String>) = self
            .candidates
            .iter()
            .cloned()
            .partition(|path| Self::matches(path, extensions));

        for path in &skipped {
            tracing::warn!(path = %path, allowed = ?extensions, "Skipping file with unsupported extension");
        }

        Ok(Some(selected))
    }
}
