//! Backend Adapter - 具名命令后端客户端实现

mod fake_backend;
mod http_backend;

pub use fake_backend::{FakeBackend, FakeBackendConfig};
pub use http_backend::*;
