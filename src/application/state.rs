//! 协调器状态
//!
//! ModelState 与 RunState 各自只有一个写入通道（`watch::Sender::send_modify`），
//! 轮询器和协调器的所有修改都经由这里串行化，并同时推送给订阅者。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::application::error::ErrorKind;
use crate::application::ports::{CoordinatorEvent, EventPublisherPort};
use crate::domain::model::ModelState;

/// 进度条模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMode {
    /// 模型尚未就绪，无法给出进度
    #[default]
    Indeterminate,
    /// 模型已下载，显示批次进度
    Determinate,
}

/// 单次运行的状态
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: Option<Uuid>,
    pub running: bool,
    pub poll_active: bool,
    pub progress_mode: ProgressMode,
    /// 后端上报的批次进度（0.0 - 1.0）
    pub task_progress: f32,
    /// 最近一次成功批次的结果，与提交顺序对齐
    pub results: Vec<Option<String>>,
    pub last_error: Option<ErrorKind>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// 共享状态存储
pub struct StateStore {
    model: watch::Sender<ModelState>,
    run: watch::Sender<RunState>,
    events: Arc<dyn EventPublisherPort>,
}

impl StateStore {
    pub fn new(model: ModelState, events: Arc<dyn EventPublisherPort>) -> Self {
        let (model, _) = watch::channel(model);
        let (run, _) = watch::channel(RunState::default());
        Self { model, run, events }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn model(&self) -> ModelState {
        self.model.borrow().clone()
    }

    pub fn run(&self) -> RunState {
        self.run.borrow().clone()
    }

    pub fn subscribe_model(&self) -> watch::Receiver<ModelState> {
        self.model.subscribe()
    }

    pub fn subscribe_run(&self) -> watch::Receiver<RunState> {
        self.run.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.run.borrow().running
    }

    pub fn set_available_kinds(&self, kinds: Vec<String>) {
        self.model.send_modify(|state| state.available_kinds = kinds);
    }

    pub fn set_selected_kind(&self, kind: &str) {
        self.model
            .send_modify(|state| state.selected_kind = kind.to_string());
    }

    /// 写入下载状态，并在运行中检查进度条是否可以切换为确定模式
    pub fn apply_download_status(&self, downloaded: HashMap<String, bool>) {
        let mut selected_ready = false;
        self.model.send_modify(|state| {
            state.downloaded = downloaded;
            selected_ready = state.selected_is_downloaded();
        });

        if selected_ready {
            self.enter_determinate();
        }
    }

    pub fn apply_loaded(&self, loaded: bool) {
        self.model.send_if_modified(|state| {
            if state.loaded_in_memory == loaded {
                return false;
            }
            state.loaded_in_memory = loaded;
            true
        });
    }

    /// 仅在运行中接受进度，迟到的响应直接丢弃
    pub fn apply_task_progress(&self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        self.run.send_if_modified(|state| {
            if !state.running {
                return false;
            }
            state.task_progress = progress;
            true
        });
    }

    pub fn set_poll_active(&self, active: bool) {
        self.run.send_if_modified(|state| {
            if state.poll_active == active {
                return false;
            }
            state.poll_active = active;
            true
        });
    }

    /// Idle -> Running
    ///
    /// 已有批次在执行时返回 false。`results` 保留到新批次成功为止。
    pub fn try_begin_run(&self, run_id: Uuid) -> bool {
        self.run.send_if_modified(|state| {
            if state.running {
                return false;
            }
            state.run_id = Some(run_id);
            state.running = true;
            state.progress_mode = ProgressMode::Indeterminate;
            state.task_progress = 0.0;
            state.last_error = None;
            state.started_at = Some(Utc::now());
            state.finished_at = None;
            true
        })
    }

    /// Running -> Idle（成功）
    pub fn finish_run(&self, results: Vec<String>) {
        self.run.send_modify(|state| {
            state.running = false;
            state.progress_mode = ProgressMode::Indeterminate;
            state.task_progress = 1.0;
            state.results = results.into_iter().map(Some).collect();
            state.finished_at = Some(Utc::now());
        });
    }

    /// Running -> Idle（失败），结果保持不变
    pub fn fail_run(&self, error: ErrorKind) {
        self.run.send_modify(|state| {
            state.running = false;
            state.progress_mode = ProgressMode::Indeterminate;
            state.last_error = Some(error);
            state.finished_at = Some(Utc::now());
        });
    }

    /// 单向切换：同一次运行内不会回退
    fn enter_determinate(&self) {
        let mut run_id = None;
        let changed = self.run.send_if_modified(|state| {
            if !state.running || state.progress_mode == ProgressMode::Determinate {
                return false;
            }
            state.progress_mode = ProgressMode::Determinate;
            run_id = state.run_id;
            true
        });

        if changed {
            tracing::debug!(run_id = ?run_id, "Progress mode switched to determinate");
            self.events.publish(CoordinatorEvent::ProgressModeChanged {
                run_id,
                mode: ProgressMode::Determinate,
            });
        }
    }
}
