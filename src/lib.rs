//! scribe-desk - 本地语音转写任务编排
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Transcription: 选中文件、解码参数、转写任务
//! - Model: 模型种类与模型状态
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TranscriptionBackend, TaskQueue, ModelPoller, FilePicker, Clipboard, Events）
//! - State: 模型/运行状态的单一写入方
//! - Coordinator: 批次执行、卸载、切换模型
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 后端、Fake 后端、文件选择器、剪贴板
//! - Memory: 内存任务队列
//! - Worker: 模型状态轮询器
//! - Events: 协调器事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
