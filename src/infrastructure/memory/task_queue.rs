//! In-Memory Task Queue Implementation

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use url::Url;

use crate::application::ports::{BatchSnapshot, TaskQueueError, TaskQueuePort};
use crate::domain::transcription::{DecodeOptions, SelectedFile, TaskEntry, TaskEntryId};

/// 内存任务队列
///
/// 文件登记表与参数表共用同一个 `Vec<TaskEntry>`
pub struct InMemoryTaskQueue {
    entries: RwLock<Vec<TaskEntry>>,
    /// 本地路径 -> 资源 URL 的前缀
    asset_base: Url,
}

impl InMemoryTaskQueue {
    pub fn new(asset_base: Url) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            asset_base,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    // 写入方不会在持锁时 panic，中毒后沿用内部数据即可
    fn read(&self) -> RwLockReadGuard<'_, Vec<TaskEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<TaskEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl TaskQueuePort for InMemoryTaskQueue {
    fn register(&self, paths: Vec<String>) -> Result<Vec<TaskEntry>, TaskQueueError> {
        // 先全部转换，任一路径非法则整批不登记
        let files = paths
            .into_iter()
            .map(|path| {
                SelectedFile::from_local_path(path.clone(), &self.asset_base)
                    .map_err(|e| TaskQueueError::InvalidFile(format!("{}: {}", path, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let new_entries: Vec<TaskEntry> = files.into_iter().map(TaskEntry::new).collect();

        let mut entries = self.write();
        entries.extend(new_entries.iter().cloned());

        tracing::debug!(
            added = new_entries.len(),
            total = entries.len(),
            "Files registered"
        );
        Ok(new_entries)
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn get_options(&self, index: usize) -> Result<DecodeOptions, TaskQueueError> {
        self.get_entry(index).map(|e| e.options().clone())
    }

    fn set_options(&self, index: usize, options: DecodeOptions) -> Result<(), TaskQueueError> {
        let mut entries = self.write();
        let len = entries.len();
        let entry = entries
            .get_mut(index)
            .ok_or(TaskQueueError::IndexOutOfRange { index, len })?;
        entry.set_options(options);

        tracing::debug!(index = index, entry_id = %entry.id(), "Decode options updated");
        Ok(())
    }

    fn get_entry(&self, index: usize) -> Result<TaskEntry, TaskQueueError> {
        let entries = self.read();
        entries
            .get(index)
            .cloned()
            .ok_or(TaskQueueError::IndexOutOfRange {
                index,
                len: entries.len(),
            })
    }

    fn entries(&self) -> Vec<TaskEntry> {
        self.read().clone()
    }

    fn snapshot(&self) -> BatchSnapshot {
        let entries = self.read();
        BatchSnapshot {
            entry_ids: entries.iter().map(|e| e.id()).collect(),
            tasks: entries.iter().map(|e| e.to_task()).collect(),
        }
    }

    fn apply_results(&self, entry_ids: &[TaskEntryId], results: &[String]) -> usize {
        let mut entries = self.write();
        let mut applied = 0;

        for (entry_id, result) in entry_ids.iter().zip(results) {
            if let Some(entry) = entries.iter_mut().find(|e| e.id() == *entry_id) {
                entry.set_result(result.clone());
                applied += 1;
            }
        }

        tracing::debug!(applied = applied, "Results written back");
        applied
    }
}
