//! Task Execution Coordinator - 转写批次编排
//!
//! 负责 run / unload / 切换模型的生命周期：
//! - run: Idle -> Running -> Idle，执行期间启动模型轮询
//! - unload: 仅在 Idle 时允许，本地状态先行更新
//! - change_selected_kind: 同步通知后端
//!
//! 三者互斥：任一未完成时其余请求返回 RunInProgress

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::application::error::{ApplicationError, ErrorKind};
use crate::application::ports::{
    BackendError, BatchSnapshot, ClipboardPort, CoordinatorEvent, EventPublisherPort,
    FilePickerPort, ModelPollerPort, TaskQueuePort, TranscriptionBackendPort,
};
use crate::application::state::{RunState, StateStore};
use crate::domain::model::ModelState;
use crate::domain::transcription::{DecodeOptions, Task, TaskEntry};

/// 协调器配置
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// 模型状态轮询周期
    pub poll_interval: Duration,
    /// 批次超时，None 表示不限制
    pub batch_timeout: Option<Duration>,
    /// 文件选择时允许的扩展名
    pub file_extensions: Vec<String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2000),
            batch_timeout: None,
            file_extensions: vec!["m4a".to_string(), "mp3".to_string()],
        }
    }
}

/// 转写任务协调器
pub struct TaskCoordinator {
    config: CoordinatorConfig,
    backend: Arc<dyn TranscriptionBackendPort>,
    queue: Arc<dyn TaskQueuePort>,
    poller: Arc<dyn ModelPollerPort>,
    state: Arc<StateStore>,
    events: Arc<dyn EventPublisherPort>,
    /// 批次、unload、切换模型三者互斥，占用期间其余请求直接拒绝
    lifecycle: Mutex<()>,
}

/// 运行中的批次被中途丢弃（调用方放弃 future）时，恢复到 Idle
struct RunGuard<'a> {
    coordinator: &'a TaskCoordinator,
    run_id: Uuid,
    armed: bool,
}

impl RunGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(run_id = %self.run_id, "Run abandoned before completion");
        self.coordinator.poller.stop();
        self.coordinator
            .state
            .fail_run(ErrorKind::BackendInvocationFailed);
    }
}

impl TaskCoordinator {
    pub fn new(
        config: CoordinatorConfig,
        backend: Arc<dyn TranscriptionBackendPort>,
        queue: Arc<dyn TaskQueuePort>,
        poller: Arc<dyn ModelPollerPort>,
        state: Arc<StateStore>,
        events: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            config,
            backend,
            queue,
            poller,
            state,
            events,
            lifecycle: Mutex::new(()),
        }
    }

    fn try_admit(&self) -> Result<MutexGuard<'_, ()>, ApplicationError> {
        self.lifecycle
            .try_lock()
            .map_err(|_| ApplicationError::RunInProgress)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn model_state(&self) -> ModelState {
        self.state.model()
    }

    pub fn run_state(&self) -> RunState {
        self.state.run()
    }

    pub fn state(&self) -> &Arc<StateStore> {
        &self.state
    }

    pub fn entries(&self) -> Vec<TaskEntry> {
        self.queue.entries()
    }

    /// 启动时查询模型种类和下载状态
    ///
    /// 两个查询并发发出；任一失败时已成功的部分仍然生效
    pub async fn initialize(&self) -> Result<ModelState, ApplicationError> {
        let (kinds, downloaded) =
            tokio::join!(self.backend.list_kinds(), self.backend.download_status());

        let mut first_error: Option<BackendError> = None;
        match kinds {
            Ok(kinds) => self.state.set_available_kinds(kinds),
            Err(e) => first_error = Some(e),
        }
        match downloaded {
            Ok(downloaded) => self.state.apply_download_status(downloaded),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }

        if let Some(e) = first_error {
            tracing::error!(error = %e, "Failed to initialize model state");
            return Err(e.into());
        }

        let model = self.state.model();
        tracing::info!(
            kinds = model.available_kinds.len(),
            selected_kind = %model.selected_kind,
            selected_downloaded = model.selected_is_downloaded(),
            "Model state initialized"
        );
        Ok(model)
    }

    /// 登记文件，每个文件附带默认解码参数
    pub fn register_files(&self, paths: Vec<String>) -> Result<Vec<TaskEntry>, ApplicationError> {
        let entries = self.queue.register(paths)?;
        tracing::info!(added = entries.len(), total = self.queue.len(), "Files registered");
        Ok(entries)
    }

    /// 通过文件选择器登记文件，返回新增数量；用户取消时为 0
    pub async fn select_files(&self, picker: &dyn FilePickerPort) -> Result<usize, ApplicationError> {
        let selected = picker.select_files(&self.config.file_extensions).await?;
        match selected {
            Some(paths) => Ok(self.register_files(paths)?.len()),
            None => {
                tracing::debug!("File selection cancelled");
                Ok(0)
            }
        }
    }

    pub fn decode_options(&self, index: usize) -> Result<DecodeOptions, ApplicationError> {
        Ok(self.queue.get_options(index)?)
    }

    /// 替换某个文件的解码参数，非法组合直接拒绝
    pub fn update_decode_options(
        &self,
        index: usize,
        options: DecodeOptions,
    ) -> Result<(), ApplicationError> {
        options.validate()?;
        self.queue.set_options(index, options)?;
        Ok(())
    }

    /// 提交当前队列中的全部任务
    pub async fn run(&self) -> Result<Vec<String>, ApplicationError> {
        self.execute(self.queue.snapshot()).await
    }

    /// 提交给定任务；结果不写回队列
    pub async fn run_tasks(&self, tasks: Vec<Task>) -> Result<Vec<String>, ApplicationError> {
        self.execute(BatchSnapshot {
            entry_ids: Vec::new(),
            tasks,
        })
        .await
    }

    async fn execute(&self, snapshot: BatchSnapshot) -> Result<Vec<String>, ApplicationError> {
        let run_id = Uuid::new_v4();
        let Ok(_admitted) = self.try_admit() else {
            tracing::warn!("Run rejected: a batch or model command is in progress");
            return Err(ApplicationError::RunInProgress);
        };
        if !self.state.try_begin_run(run_id) {
            tracing::warn!("Run rejected: a batch is already running");
            return Err(ApplicationError::RunInProgress);
        }
        let guard = RunGuard {
            coordinator: self,
            run_id,
            armed: true,
        };

        let task_count = snapshot.len();
        tracing::info!(run_id = %run_id, task_count = task_count, "Submitting batch");
        self.events.publish(CoordinatorEvent::RunStarted { run_id, task_count });

        self.poller.start(self.config.poll_interval);
        let outcome = self.submit(snapshot.tasks).await;
        self.poller.stop();
        guard.disarm();

        let outcome = outcome.and_then(|results| {
            if results.len() == task_count {
                Ok(results)
            } else {
                Err(ApplicationError::backend(format!(
                    "expected {} results, got {}",
                    task_count,
                    results.len()
                )))
            }
        });

        match outcome {
            Ok(results) => {
                self.queue.apply_results(&snapshot.entry_ids, &results);
                self.state.finish_run(results.clone());
                self.events.publish(CoordinatorEvent::RunCompleted {
                    run_id,
                    results: results.clone(),
                });
                tracing::info!(run_id = %run_id, task_count = task_count, "Batch completed");
                Ok(results)
            }
            Err(e) => {
                let kind = e.kind();
                self.state.fail_run(kind);
                self.events.publish(CoordinatorEvent::RunFailed {
                    run_id,
                    error: kind,
                    message: e.to_string(),
                });
                tracing::error!(run_id = %run_id, error = %e, "Batch failed");
                Err(e)
            }
        }
    }

    async fn submit(&self, tasks: Vec<Task>) -> Result<Vec<String>, ApplicationError> {
        let request = self.backend.run_batch(tasks);
        let response = match self.config.batch_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or(Err(BackendError::Timeout)),
            None => request.await,
        };
        Ok(response?)
    }

    /// 释放后端内存中的模型
    ///
    /// 批次执行或其他模型命令未完成时拒绝。`loaded_in_memory` 立即置为 false，不等待轮询确认；
    /// 之后的轮询结果仍可能覆盖它。
    pub async fn unload(&self) -> Result<(), ApplicationError> {
        let Ok(_admitted) = self.try_admit() else {
            tracing::warn!("Unload rejected: a batch or model command is in progress");
            return Err(ApplicationError::RunInProgress);
        };

        self.state.apply_loaded(false);
        self.events.publish(CoordinatorEvent::ModelUnloaded);

        self.backend.unload().await.map_err(|e| {
            tracing::error!(error = %e, "Backend unload failed");
            ApplicationError::from(e)
        })?;

        tracing::info!("Model unload requested");
        Ok(())
    }

    /// 切换模型，不校验是否在 available_kinds 中
    ///
    /// 与 unload 一样，占用期间新的批次无法开始
    pub async fn change_selected_kind(&self, kind: &str) -> Result<(), ApplicationError> {
        let Ok(_admitted) = self.try_admit() else {
            tracing::warn!(kind = %kind, "Model change rejected: a batch or model command is in progress");
            return Err(ApplicationError::RunInProgress);
        };

        self.backend.set_selected_kind(kind).await?;
        self.state.set_selected_kind(kind);
        self.events.publish(CoordinatorEvent::ModelKindChanged {
            kind: kind.to_string(),
        });

        tracing::info!(kind = %kind, "Selected model changed");
        Ok(())
    }

    /// 把某个文件的转写结果复制到剪贴板
    pub fn copy_result(
        &self,
        index: usize,
        clipboard: &dyn ClipboardPort,
    ) -> Result<(), ApplicationError> {
        let entry = self.queue.get_entry(index)?;
        let text = entry.result().ok_or(ApplicationError::NoResult(index))?;
        clipboard.copy(text);
        Ok(())
    }

    /// 停止轮询
    pub fn shutdown(&self) {
        self.poller.stop();
        tracing::info!("Coordinator shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::commands;
    use crate::application::state::ProgressMode;
    use crate::domain::transcription::TaskKind;
    use crate::infrastructure::adapters::{FakeBackend, FakeBackendConfig, PresetFilePicker};
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::InMemoryTaskQueue;
    use crate::infrastructure::worker::ModelPoller;
    use std::sync::Mutex;
    use url::Url;

    struct Harness {
        coordinator: Arc<TaskCoordinator>,
        backend: Arc<FakeBackend>,
        poller: Arc<ModelPoller>,
        events: Arc<EventPublisher>,
    }

    fn harness(backend_config: FakeBackendConfig, config: CoordinatorConfig) -> Harness {
        let backend = Arc::new(FakeBackend::new(backend_config));
        let events = EventPublisher::new().arc();
        let state = StateStore::new(ModelState::default(), events.clone()).arc();
        let queue = InMemoryTaskQueue::new(Url::parse("asset://localhost/").unwrap()).arc();
        let poller = ModelPoller::new(backend.clone(), state.clone()).arc();
        let coordinator = TaskCoordinator::new(
            config,
            backend.clone(),
            queue,
            poller.clone(),
            state,
            events.clone(),
        )
        .arc();
        Harness {
            coordinator,
            backend,
            poller,
            events,
        }
    }

    fn default_harness() -> Harness {
        harness(FakeBackendConfig::default(), CoordinatorConfig::default())
    }

    fn slow_batches(delay_secs: u64) -> FakeBackendConfig {
        FakeBackendConfig {
            batch_delay: Duration::from_secs(delay_secs),
            ..Default::default()
        }
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Mutex<Vec<String>>,
    }

    impl ClipboardPort for RecordingClipboard {
        fn copy(&self, text: &str) {
            self.copied.lock().unwrap().push(text.to_string());
        }
    }

    #[tokio::test]
    async fn test_initialize_loads_kinds_and_download_status() {
        let h = default_harness();
        h.backend.set_downloaded("Base", true);

        let model = h.coordinator.initialize().await.unwrap();
        assert_eq!(model.available_kinds.len(), 9);
        assert_eq!(model.available_kinds[2], "Base");
        assert_eq!(model.selected_kind, "Base");
        assert!(model.selected_is_downloaded());
    }

    #[tokio::test]
    async fn test_initialize_failure_is_reported() {
        let h = default_harness();
        h.backend.fail_queries(true);
        let result = h.coordinator.initialize().await;
        assert!(matches!(
            result,
            Err(ApplicationError::BackendInvocationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_single_file_run() {
        let h = default_harness();
        h.backend.set_batch_results(vec!["hello world".to_string()]);

        h.coordinator.register_files(paths(&["/talk.mp3"])).unwrap();
        assert_eq!(h.coordinator.decode_options(0).unwrap(), DecodeOptions::default());

        let results = h.coordinator.run().await.unwrap();
        assert_eq!(results, vec!["hello world"]);

        let run = h.coordinator.run_state();
        assert!(!run.running);
        assert!(!run.poll_active);
        assert_eq!(run.results, vec![Some("hello world".to_string())]);
        assert_eq!(run.last_error, None);
        assert_eq!(h.coordinator.entries()[0].result(), Some("hello world"));
        assert!(!h.poller.is_active());
    }

    #[tokio::test]
    async fn test_results_preserve_submission_order() {
        let h = default_harness();
        h.coordinator
            .register_files(paths(&["/a.mp3", "/b.mp3", "/c.m4a"]))
            .unwrap();
        h.coordinator
            .update_decode_options(1, DecodeOptions::default().with_task_kind(TaskKind::Translate))
            .unwrap();

        let results = h.coordinator.run().await.unwrap();
        assert_eq!(
            results,
            vec![
                "transcript of /a.mp3",
                "transcript of /b.mp3",
                "transcript of /c.m4a"
            ]
        );

        let submitted = h.backend.last_batch().unwrap();
        assert_eq!(submitted[1].decode_option.task_kind, TaskKind::Translate);
        assert_eq!(submitted[0].decode_option.task_kind, TaskKind::Transcribe);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch_completes_and_stops_poller() {
        let h = default_harness();
        let results = h.coordinator.run().await.unwrap();
        assert!(results.is_empty());
        assert!(h.coordinator.run_state().results.is_empty());
        assert!(!h.poller.is_active());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(h.backend.call_count(commands::DOWNLOAD_STATUS) <= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_turns_determinate_once_when_model_downloads() {
        let h = harness(slow_batches(10), CoordinatorConfig::default());
        let mut events = h.events.subscribe();

        h.coordinator.change_selected_kind("Small").await.unwrap();
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let coordinator = h.coordinator.clone();
        let run = tokio::spawn(async move { coordinator.run().await });

        tokio::time::sleep(Duration::from_millis(3000)).await;
        let state = h.coordinator.run_state();
        assert!(state.running);
        assert!(state.poll_active);
        assert_eq!(state.progress_mode, ProgressMode::Indeterminate);

        h.backend.set_downloaded("Small", true);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(h.coordinator.run_state().progress_mode, ProgressMode::Determinate);

        // 后端短暂报告未下载，进度条不回退
        h.backend.set_downloaded("Small", false);
        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(h.coordinator.run_state().progress_mode, ProgressMode::Determinate);

        run.await.unwrap().unwrap();
        let state = h.coordinator.run_state();
        assert!(!state.running);
        assert_eq!(state.progress_mode, ProgressMode::Indeterminate);

        let mut transitions = 0;
        while let Ok(event) = events.try_recv() {
            if let CoordinatorEvent::ProgressModeChanged { mode, .. } = event {
                assert_eq!(mode, ProgressMode::Determinate);
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_progress_tracked_while_running() {
        let h = harness(slow_batches(10), CoordinatorConfig::default());
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let coordinator = h.coordinator.clone();
        let run = tokio::spawn(async move { coordinator.run().await });

        tokio::time::sleep(Duration::from_millis(1000)).await;
        h.backend.set_progress(0.5);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(h.coordinator.run_state().task_progress, 0.5);

        run.await.unwrap().unwrap();
        assert_eq!(h.coordinator.run_state().task_progress, 1.0);
    }

    #[tokio::test]
    async fn test_unload_is_optimistic() {
        let h = default_harness();
        h.coordinator.state().apply_loaded(true);

        h.coordinator.unload().await.unwrap();
        assert!(!h.coordinator.model_state().loaded_in_memory);
        assert_eq!(h.backend.call_count(commands::UNLOAD), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_may_overwrite_optimistic_unload() {
        // 乐观更新之后，以轮询到的后端状态为准（最终一致）
        let h = default_harness();
        h.coordinator.state().apply_loaded(true);
        h.coordinator.unload().await.unwrap();
        assert!(!h.coordinator.model_state().loaded_in_memory);

        h.backend.set_loaded(true);
        h.poller.start(Duration::from_millis(2000));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(h.coordinator.model_state().loaded_in_memory);
        h.poller.stop();
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_previous_results() {
        let h = default_harness();
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();
        h.backend.set_batch_results(vec!["first".to_string()]);
        h.coordinator.run().await.unwrap();

        h.backend.fail_batches(true);
        let result = h.coordinator.run().await;
        assert!(matches!(
            result,
            Err(ApplicationError::BackendInvocationFailed(_))
        ));

        let run = h.coordinator.run_state();
        assert!(!run.running);
        assert!(!run.poll_active);
        assert_eq!(run.last_error, Some(ErrorKind::BackendInvocationFailed));
        assert_eq!(run.results, vec![Some("first".to_string())]);
        assert!(!h.poller.is_active());
    }

    #[tokio::test]
    async fn test_result_count_mismatch_fails_run() {
        let h = default_harness();
        h.coordinator.register_files(paths(&["/a.mp3", "/b.mp3"])).unwrap();
        h.backend.set_batch_results(vec!["only one".to_string()]);

        let result = h.coordinator.run().await;
        assert!(result.is_err());
        assert_eq!(
            h.coordinator.run_state().last_error,
            Some(ErrorKind::BackendInvocationFailed)
        );
        assert!(h.coordinator.entries()[0].result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_timeout() {
        let config = CoordinatorConfig {
            batch_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let h = harness(slow_batches(60), config);
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let result = h.coordinator.run().await;
        assert!(matches!(
            result,
            Err(ApplicationError::BackendInvocationFailed(_))
        ));
        assert!(!h.coordinator.run_state().running);
        assert!(!h.poller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_run_and_unload_rejected() {
        let h = harness(slow_batches(10), CoordinatorConfig::default());
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let coordinator = h.coordinator.clone();
        let run = tokio::spawn(async move { coordinator.run().await });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(matches!(
            h.coordinator.run().await,
            Err(ApplicationError::RunInProgress)
        ));
        assert!(matches!(
            h.coordinator.unload().await,
            Err(ApplicationError::RunInProgress)
        ));
        assert!(matches!(
            h.coordinator.change_selected_kind("Tiny").await,
            Err(ApplicationError::RunInProgress)
        ));
        assert_eq!(h.backend.call_count(commands::RUN_BATCH), 1);
        assert_eq!(h.backend.call_count(commands::UNLOAD), 0);

        run.await.unwrap().unwrap();
        assert_eq!(h.coordinator.run_state().last_error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_run_returns_to_idle() {
        let h = harness(slow_batches(10), CoordinatorConfig::default());
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let abandoned =
            tokio::time::timeout(Duration::from_secs(1), h.coordinator.run()).await;
        assert!(abandoned.is_err());

        let run = h.coordinator.run_state();
        assert!(!run.running);
        assert!(!h.poller.is_active());
    }

    fn slow_commands() -> FakeBackendConfig {
        FakeBackendConfig {
            command_delay: Duration::from_millis(500),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_rejected_while_model_change_in_flight() {
        let h = harness(slow_commands(), CoordinatorConfig::default());
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let coordinator = h.coordinator.clone();
        let change = tokio::spawn(async move { coordinator.change_selected_kind("Small").await });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(matches!(
            h.coordinator.run().await,
            Err(ApplicationError::RunInProgress)
        ));
        assert!(!h.coordinator.run_state().running);
        assert_eq!(h.backend.call_count(commands::RUN_BATCH), 0);

        change.await.unwrap().unwrap();
        assert_eq!(h.coordinator.model_state().selected_kind, "Small");
        assert_eq!(h.backend.selected_kind(), "Small");

        // 命令完成后可以正常提交
        h.coordinator.run().await.unwrap();
        assert_eq!(h.backend.last_batch().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_rejected_while_unload_in_flight() {
        let h = harness(slow_commands(), CoordinatorConfig::default());
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        let coordinator = h.coordinator.clone();
        let unload = tokio::spawn(async move { coordinator.unload().await });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(matches!(
            h.coordinator.run().await,
            Err(ApplicationError::RunInProgress)
        ));
        assert!(matches!(
            h.coordinator.unload().await,
            Err(ApplicationError::RunInProgress)
        ));
        assert!(!h.coordinator.run_state().running);

        unload.await.unwrap().unwrap();
        assert_eq!(h.backend.call_count(commands::UNLOAD), 1);
        assert_eq!(h.backend.call_count(commands::RUN_BATCH), 0);
    }

    #[tokio::test]
    async fn test_change_selected_kind_notifies_backend() {
        let h = default_harness();
        h.coordinator.change_selected_kind("NotAKind").await.unwrap();
        assert_eq!(h.backend.selected_kind(), "NotAKind");
        assert_eq!(h.coordinator.model_state().selected_kind, "NotAKind");
    }

    #[tokio::test]
    async fn test_update_options_rejects_bad_index_and_invalid_options() {
        let h = default_harness();
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        assert!(matches!(
            h.coordinator.update_decode_options(3, DecodeOptions::default()),
            Err(ApplicationError::IndexOutOfRange { index: 3, len: 1 })
        ));

        let invalid = DecodeOptions {
            patience: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(
            h.coordinator.update_decode_options(0, invalid),
            Err(ApplicationError::ValidationError(_))
        ));
        assert_eq!(h.coordinator.decode_options(0).unwrap(), DecodeOptions::default());
    }

    #[tokio::test]
    async fn test_select_files_through_picker() {
        let h = default_harness();
        let picker = PresetFilePicker::new(paths(&["/a.mp3", "/b.txt", "/c.m4a"]));
        assert_eq!(h.coordinator.select_files(&picker).await.unwrap(), 2);

        let cancelled = PresetFilePicker::new(vec![]);
        assert_eq!(h.coordinator.select_files(&cancelled).await.unwrap(), 0);
        assert_eq!(h.coordinator.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_copy_result() {
        let h = default_harness();
        let clipboard = RecordingClipboard::default();
        h.coordinator.register_files(paths(&["/a.mp3"])).unwrap();

        assert!(matches!(
            h.coordinator.copy_result(0, &clipboard),
            Err(ApplicationError::NoResult(0))
        ));
        assert!(matches!(
            h.coordinator.copy_result(1, &clipboard),
            Err(ApplicationError::IndexOutOfRange { .. })
        ));

        h.coordinator.run().await.unwrap();
        h.coordinator.copy_result(0, &clipboard).unwrap();
        assert_eq!(
            clipboard.copied.lock().unwrap().as_slice(),
            ["transcript of /a.mp3".to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_tasks_does_not_touch_queue() {
        let h = default_harness();
        h.coordinator.register_files(paths(&["/queued.mp3"])).unwrap();

        let tasks = vec![Task {
            file_path: "/adhoc.mp3".to_string(),
            decode_option: DecodeOptions::default(),
        }];
        let results = h.coordinator.run_tasks(tasks).await.unwrap();
        assert_eq!(results, vec!["transcript of /adhoc.mp3"]);
        assert!(h.coordinator.entries()[0].result().is_none());
    }
}
