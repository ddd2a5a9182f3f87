//! File Picker Port - 文件选择对话框

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("File dialog unavailable: {0}")]
    Unavailable(String),
}

/// File Picker Port
#[async_trait]
pub trait FilePickerPort: Send + Sync {
    /// 按扩展名过滤选择文件；用户取消时返回 `Ok(None)`
    async fn select_files(&self, extensions: &[String]) -> Result<Option<Vec<String>>, PickerError>;
}
