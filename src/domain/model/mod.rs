//! Model Context - 推理模型限界上下文
//!
//! 职责:
//! - 模型种类（ModelKind）
//! - 后端模型状态快照（ModelState）

mod state;
mod value_objects;

pub use state::{ModelState, DEFAULT_MODEL_KIND};
pub use value_objects::{ModelKind, UnknownModelKind};
