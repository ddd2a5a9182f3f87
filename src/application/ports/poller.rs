//! Model Poller Port - 模型状态轮询

use std::time::Duration;

/// Model Poller Port
///
/// `start` / `stop` 是唯一能改变轮询节奏的操作，两者都是幂等的
pub trait ModelPollerPort: Send + Sync {
    /// 立即轮询一次，然后按 `interval` 周期轮询；已在运行时不做任何事
    fn start(&self, interval: Duration);

    /// 停止后续轮询；已发出的请求仍会完成并写回状态
    fn stop(&self);

    fn is_active(&self) -> bool;
}
