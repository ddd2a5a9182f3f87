//! Transcription Backend Port - 具名命令后端
//!
//! 协调器只通过此接口访问后端，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::transcription::Task;

/// 后端调用错误
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Command {command} rejected: {message}")]
    Rejected { command: &'static str, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 后端命令名
pub mod commands {
    pub const LIST_KINDS: &str = "model.list_kinds";
    pub const DOWNLOAD_STATUS: &str = "model.download_status";
    pub const IS_LOADED: &str = "model.is_loaded";
    pub const SET_SELECTED_KIND: &str = "model.set_selected_kind";
    pub const UNLOAD: &str = "model.unload";
    pub const RUN_BATCH: &str = "transcription.run_batch";
    pub const TASK_PROGRESS: &str = "transcription.task_progress";
}

/// Transcription Backend Port
///
/// 所有调用都是请求/响应式的，可并发发起
#[async_trait]
pub trait TranscriptionBackendPort: Send + Sync {
    /// 可用的模型种类（有序）
    async fn list_kinds(&self) -> Result<Vec<String>, BackendError>;

    /// 每种模型是否已下载
    async fn download_status(&self) -> Result<HashMap<String, bool>, BackendError>;

    /// 模型是否已加载到内存
    async fn is_loaded(&self) -> Result<bool, BackendError>;

    /// 通知后端切换模型
    async fn set_selected_kind(&self, kind: &str) -> Result<(), BackendError>;

    /// 释放内存中的模型
    async fn unload(&self) -> Result<(), BackendError>;

    /// 批量执行转写，结果与输入按索引对齐
    async fn run_batch(&self, tasks: Vec<Task>) -> Result<Vec<String>, BackendError>;

    /// 当前批次进度（0.0 - 1.0）
    async fn task_progress(&self) -> Result<f32, BackendError>;
}
