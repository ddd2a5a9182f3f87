//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod backend;
mod clipboard;
mod events;
mod file_picker;
mod poller;
mod task_queue;

pub use backend::{commands, BackendError, TranscriptionBackendPort};
pub use clipboard::ClipboardPort;
pub use events::{CoordinatorEvent, EventPublisherPort};
pub use file_picker::{FilePickerPort, PickerError};
pub use poller::ModelPollerPort;
pub use task_queue::{BatchSnapshot, TaskQueueError, TaskQueuePort};
