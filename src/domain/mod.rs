//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Transcription Context: 转写任务（文件、解码参数、结果）
//! - Model Context: 后端模型状态

pub mod model;
pub mod transcription;
