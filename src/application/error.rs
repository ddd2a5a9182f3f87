//! 应用层错误定义
//!
//! 协调器对外的统一错误类型

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{BackendError, PickerError, TaskQueueError};
use crate::domain::transcription::DecodeOptionsError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 后端命令调用失败或超时
    #[error("Backend invocation failed: {0}")]
    BackendInvocationFailed(String),

    /// 配置了不存在的文件索引
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// 已有批次或模型命令在执行
    #[error("A batch or model command is already in progress")]
    RunInProgress,

    /// 该条目还没有转写结果
    #[error("No result for task {0}")]
    NoResult(usize),

    /// 文件选择失败
    #[error("File selection failed: {0}")]
    FileSelectionFailed(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 写入 RunState 的错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BackendInvocationFailed,
    IndexOutOfRange,
    RunInProgress,
    NoResult,
    FileSelection,
    Validation,
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BackendInvocationFailed(_) => ErrorKind::BackendInvocationFailed,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::RunInProgress => ErrorKind::RunInProgress,
            Self::NoResult(_) => ErrorKind::NoResult,
            Self::FileSelectionFailed(_) => ErrorKind::FileSelection,
            Self::ValidationError(_) => ErrorKind::Validation,
        }
    }

    /// 创建后端调用错误
    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendInvocationFailed(message.into())
    }
}

impl From<BackendError> for ApplicationError {
    fn from(err: BackendError) -> Self {
        Self::BackendInvocationFailed(err.to_string())
    }
}

impl From<TaskQueueError> for ApplicationError {
    fn from(err: TaskQueueError) -> Self {
        match err {
            TaskQueueError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            TaskQueueError::InvalidFile(message) => Self::ValidationError(message),
        }
    }
}

impl From<DecodeOptionsError> for ApplicationError {
    fn from(err: DecodeOptionsError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<PickerError> for ApplicationError {
    fn from(err: PickerError) -> Self {
        Self::FileSelectionFailed(err.to_string())
    }
}
