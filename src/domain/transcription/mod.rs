//! Transcription Context - 转写任务限界上下文
//!
//! 职责:
//! - 输入文件登记（SelectedFile）
//! - 每个文件的解码参数（DecodeOptions）
//! - 提交给后端的任务单元（Task）

mod entities;
mod errors;
mod value_objects;

pub use entities::{SelectedFile, Task, TaskEntry, TaskEntryId};
pub use errors::DecodeOptionsError;
pub use value_objects::{DecodeOptions, SuppressTokens, TaskKind};
