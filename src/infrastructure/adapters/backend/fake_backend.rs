//! Fake Backend - 用于测试和 dry-run 的后端
//!
//! 在进程内模拟模型子系统，不实际执行推理

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::application::ports::{commands, BackendError, TranscriptionBackendPort};
use crate::domain::model::{ModelKind, DEFAULT_MODEL_KIND};
use crate::domain::transcription::Task;

/// Fake Backend 配置
#[derive(Debug, Clone)]
pub struct FakeBackendConfig {
    /// 返回的模型种类
    pub kinds: Vec<String>,
    /// 模拟批次执行耗时
    pub batch_delay: Duration,
    /// 模拟状态查询耗时
    pub query_delay: Duration,
    /// 模拟 set_selected_kind / unload 耗时
    pub command_delay: Duration,
}

impl Default for FakeBackendConfig {
    fn default() -> Self {
        Self {
            kinds: ModelKind::ALL.iter().map(|k| k.to_string()).collect(),
            batch_delay: Duration::ZERO,
            query_delay: Duration::ZERO,
            command_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    selected_kind: String,
    downloaded: HashMap<String, bool>,
    progress: f32,
    scripted_results: Option<Vec<String>>,
    last_batch: Option<Vec<Task>>,
    calls: HashMap<&'static str, usize>,
}

/// Fake Backend
///
/// 批次完成时把当前模型标记为已下载、已加载；
/// 默认结果为 `transcript of <file_path>`，可用 `set_batch_results` 覆盖。
pub struct FakeBackend {
    config: FakeBackendConfig,
    state: Mutex<FakeState>,
    loaded: AtomicBool,
    fail_batches: AtomicBool,
    fail_queries: AtomicBool,
}

impl FakeBackend {
    pub fn new(config: FakeBackendConfig) -> Self {
        tracing::info!(
            kinds = config.kinds.len(),
            batch_delay_ms = config.batch_delay.as_millis() as u64,
            "FakeBackend initialized"
        );
        Self {
            config,
            state: Mutex::new(FakeState {
                selected_kind: DEFAULT_MODEL_KIND.to_string(),
                ..Default::default()
            }),
            loaded: AtomicBool::new(false),
            fail_batches: AtomicBool::new(false),
            fail_queries: AtomicBool::new(false),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeBackendConfig::default())
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, command: &'static str) {
        *self.lock().calls.entry(command).or_insert(0) += 1;
    }

    async fn query(&self, command: &'static str) -> Result<(), BackendError> {
        self.record(command);
        if !self.config.query_delay.is_zero() {
            tokio::time::sleep(self.config.query_delay).await;
        }
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(BackendError::Rejected {
                command,
                message: "query failure injected".to_string(),
            });
        }
        Ok(())
    }

    async fn command(&self, command: &'static str) {
        self.record(command);
        if !self.config.command_delay.is_zero() {
            tokio::time::sleep(self.config.command_delay).await;
        }
    }

    pub fn set_downloaded(&self, kind: &str, downloaded: bool) {
        self.lock().downloaded.insert(kind.to_string(), downloaded);
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }

    pub fn set_progress(&self, progress: f32) {
        self.lock().progress = progress;
    }

    pub fn set_batch_results(&self, results: Vec<String>) {
        self.lock().scripted_results = Some(results);
    }

    pub fn fail_batches(&self, fail: bool) {
        self.fail_batches.store(fail, Ordering::SeqCst);
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.lock().calls.get(command).copied().unwrap_or(0)
    }

    pub fn selected_kind(&self) -> String {
        self.lock().selected_kind.clone()
    }

    pub fn is_loaded_now(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn last_batch(&self) -> Option<Vec<Task>> {
        self.lock().last_batch.clone()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl TranscriptionBackendPort for FakeBackend {
    async fn list_kinds(&self) -> Result<Vec<String>, BackendError> {
        self.query(commands::LIST_KINDS).await?;
        Ok(self.config.kinds.clone())
    }

    async fn download_status(&self) -> Result<HashMap<String, bool>, BackendError> {
        self.query(commands::DOWNLOAD_STATUS).await?;
        let state = self.lock();
        let mut status: HashMap<String, bool> = self
            .config
            .kinds
            .iter()
            .map(|k| (k.clone(), false))
            .collect();
        status.extend(state.downloaded.iter().map(|(k, v)| (k.clone(), *v)));
        Ok(status)
    }

    async fn is_loaded(&self) -> Result<bool, BackendError> {
        self.query(commands::IS_LOADED).await?;
        Ok(self.loaded.load(Ordering::SeqCst))
    }

    async fn set_selected_kind(&self, kind: &str) -> Result<(), BackendError> {
        self.command(commands::SET_SELECTED_KIND).await;
        let mut state = self.lock();
        if state.selected_kind != kind {
            // 切换模型会丢弃已加载的实例
            self.loaded.store(false, Ordering::SeqCst);
        }
        state.selected_kind = kind.to_string();
        Ok(())
    }

    async fn unload(&self) -> Result<(), BackendError> {
        self.command(commands::UNLOAD).await;
        self.loaded.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn run_batch(&self, tasks: Vec<Task>) -> Result<Vec<String>, BackendError> {
        self.record(commands::RUN_BATCH);
        tracing::debug!(count = tasks.len(), "FakeBackend: running batch");
        {
            let mut state = self.lock();
            state.progress = 0.0;
            state.last_batch = Some(tasks.clone());
        }

        if !self.config.batch_delay.is_zero() {
            tokio::time::sleep(self.config.batch_delay).await;
        }

        if self.fail_batches.load(Ordering::SeqCst) {
            return Err(BackendError::Rejected {
                command: commands::RUN_BATCH,
                message: "batch failure injected".to_string(),
            });
        }

        let mut state = self.lock();
        let selected = state.selected_kind.clone();
        state.downloaded.insert(selected, true);
        state.progress = 1.0;
        self.loaded.store(true, Ordering::SeqCst);

        let results = match state.scripted_results.clone() {
            Some(results) => results,
            None => tasks
                .iter()
                .map(|t| format!("transcript of {}", t.file_path))
                .collect(),
        };
        Ok(results)
    }

    async fn task_progress(&self) -> Result<f32, BackendError> {
        self.query(commands::TASK_PROGRESS).await?;
        Ok(self.lock().progress)
    }
}
