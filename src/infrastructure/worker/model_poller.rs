//! Model Poller - Background Model State Refresher

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{ModelPollerPort, TranscriptionBackendPort};
use crate::application::state::StateStore;

/// 正在运行的轮询任务
struct PollHandle {
    cancel: CancellationToken,
    interval: Duration,
}

/// 模型状态轮询器
///
/// 每个周期并发发出三个互不等待的请求（下载状态、是否驻留内存、批次进度），
/// 响应按到达顺序写入 StateStore。
pub struct ModelPoller {
    backend: Arc<dyn TranscriptionBackendPort>,
    state: Arc<StateStore>,
    handle: Mutex<Option<PollHandle>>,
}

impl ModelPoller {
    pub fn new(backend: Arc<dyn TranscriptionBackendPort>, state: Arc<StateStore>) -> Self {
        Self {
            backend,
            state,
            handle: Mutex::new(None),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn lock_handle(&self) -> MutexGuard<'_, Option<PollHandle>> {
        self.handle.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 轮询循环：第一次 tick 立即触发
    async fn run(
        backend: Arc<dyn TranscriptionBackendPort>,
        state: Arc<StateStore>,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => Self::tick(&backend, &state),
            }
        }

        tracing::debug!("Model poller loop exited");
    }

    /// 发出一轮查询，不等待响应
    ///
    /// 请求任务不持有取消令牌：stop 之后已发出的请求仍会写回状态。
    fn tick(backend: &Arc<dyn TranscriptionBackendPort>, state: &Arc<StateStore>) {
        tracing::trace!("Model poller tick");

        let (b, s) = (backend.clone(), state.clone());
        tokio::spawn(async move {
            match b.download_status().await {
                Ok(downloaded) => s.apply_download_status(downloaded),
                Err(e) => tracing::warn!(error = %e, "Download status poll failed"),
            }
        });

        let (b, s) = (backend.clone(), state.clone());
        tokio::spawn(async move {
            match b.is_loaded().await {
                Ok(loaded) => s.apply_loaded(loaded),
                Err(e) => tracing::warn!(error = %e, "Residency poll failed"),
            }
        });

        let (b, s) = (backend.clone(), state.clone());
        tokio::spawn(async move {
            match b.task_progress().await {
                Ok(progress) => s.apply_task_progress(progress),
                Err(e) => tracing::warn!(error = %e, "Task progress poll failed"),
            }
        });
    }
}

impl ModelPollerPort for ModelPoller {
    fn start(&self, interval: Duration) {
        let mut handle = self.lock_handle();
        if let Some(active) = handle.as_ref() {
            tracing::debug!(
                interval_ms = active.interval.as_millis() as u64,
                "Model poller already running"
            );
            return;
        }

        let cancel = CancellationToken::new();
        tokio::spawn(Self::run(
            self.backend.clone(),
            self.state.clone(),
            interval,
            cancel.clone(),
        ));
        *handle = Some(PollHandle { cancel, interval });
        self.state.set_poll_active(true);

        tracing::info!(interval_ms = interval.as_millis() as u64, "Model poller started");
    }

    fn stop(&self) {
        let Some(active) = self.lock_handle().take() else {
            return;
        };
        active.cancel.cancel();
        self.state.set_poll_active(false);

        tracing::info!("Model poller stopped");
    }

    fn is_active(&self) -> bool {
        self.lock_handle().is_some()
    }
}

impl Drop for ModelPoller {
    fn drop(&mut self) {
        if let Some(active) = self.lock_handle().take() {
            active.cancel.cancel();
        }
    }
}
