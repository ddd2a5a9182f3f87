//! Worker Layer - Background Task Processing
//!
//! 实现 ModelPoller，周期性查询后端模型状态

mod model_poller;

pub use model_poller::ModelPoller;
