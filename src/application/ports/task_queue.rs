//! Task Queue Port - 文件登记与解码参数
//!
//! 文件登记表与参数表合并为同一个有序容器，具体实现在 infrastructure/memory 层

use thiserror::Error;

use crate::domain::transcription::{DecodeOptions, Task, TaskEntry, TaskEntryId};

/// Task Queue 错误
#[derive(Debug, Error)]
pub enum TaskQueueError {
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid file: {0}")]
    InvalidFile(String),
}

/// 一次提交的快照：条目 ID 与任务一一对应
#[derive(Debug, Clone, Default)]
pub struct BatchSnapshot {
    pub entry_ids: Vec<TaskEntryId>,
    pub tasks: Vec<Task>,
}

impl BatchSnapshot {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Task Queue Port
///
/// 只追加，不去重：同一路径选择两次得到两个独立条目
pub trait TaskQueuePort: Send + Sync {
    /// 按顺序登记文件，每个文件附带默认解码参数，返回新条目
    fn register(&self, paths: Vec<String>) -> Result<Vec<TaskEntry>, TaskQueueError>;

    /// 条目数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 读取解码参数
    fn get_options(&self, index: usize) -> Result<DecodeOptions, TaskQueueError>;

    /// 替换解码参数
    fn set_options(&self, index: usize, options: DecodeOptions) -> Result<(), TaskQueueError>;

    /// 获取条目
    fn get_entry(&self, index: usize) -> Result<TaskEntry, TaskQueueError>;

    /// 所有条目（有序）
    fn entries(&self) -> Vec<TaskEntry>;

    /// 生成提交快照
    fn snapshot(&self) -> BatchSnapshot;

    /// 按条目 ID 写回结果，返回写入数量
    fn apply_results(&self, entry_ids: &[TaskEntryId], results: &[String]) -> usize;
}
