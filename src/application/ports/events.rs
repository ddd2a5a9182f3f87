//! Event Port - 面向 UI 的通知

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::error::ErrorKind;
use crate::application::state::ProgressMode;

/// 协调器事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum CoordinatorEvent {
    /// 批次已提交
    RunStarted { run_id: Uuid, task_count: usize },
    /// 进度条模式变化
    ProgressModeChanged { run_id: Option<Uuid>, mode: ProgressMode },
    /// 批次完成
    RunCompleted { run_id: Uuid, results: Vec<String> },
    /// 批次失败
    RunFailed { run_id: Uuid, error: ErrorKind, message: String },
    /// 模型已释放
    ModelUnloaded,
    /// 模型已切换
    ModelKindChanged { kind: String },
}

/// Event Publisher Port
pub trait EventPublisherPort: Send + Sync {
    fn publish(&self, event: CoordinatorEvent);
}
