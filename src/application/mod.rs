//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TranscriptionBackend、TaskQueue、ModelPoller 等）
//! - state: 单一写入方的模型/运行状态
//! - coordinator: 转写批次的执行协调
//! - error: 应用层错误定义

pub mod coordinator;
pub mod error;
pub mod ports;
pub mod state;

pub use coordinator::{CoordinatorConfig, TaskCoordinator};
pub use error::{ApplicationError, ErrorKind};
pub use ports::{
    BackendError, BatchSnapshot, ClipboardPort, CoordinatorEvent, EventPublisherPort,
    FilePickerPort, ModelPollerPort, PickerError, TaskQueueError, TaskQueuePort,
    TranscriptionBackendPort,
};
pub use state::{ProgressMode, RunState, StateStore};
