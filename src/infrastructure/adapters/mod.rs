//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod backend;
pub mod clipboard;
pub mod file_picker;

pub use backend::*;
pub use clipboard::ArboardClipboard;
pub use file_picker::PresetFilePicker;
