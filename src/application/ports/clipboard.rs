//! Clipboard Port - 剪贴板

/// Clipboard Port
///
/// 尽力而为，不返回结果
pub trait ClipboardPort: Send + Sync {
    fn copy(&self, text: &str);
}
