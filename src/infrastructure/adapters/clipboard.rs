//! Clipboard Adapter - 系统剪贴板

use crate::application::ports::ClipboardPort;

/// 基于 arboard 的系统剪贴板
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ClipboardPort for ArboardClipboard {
    fn copy(&self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => tracing::debug!(len = text.len(), "Copied to clipboard"),
            Err(e) => tracing::warn!(error = %e, "Clipboard unavailable"),
        }
    }
}
