//! Memory Layer - In-Memory State Management
//!
//! 实现 TaskQueue，管理已选文件及其解码参数的内存状态

mod task_queue;

pub use task_queue::InMemoryTaskQueue;
