//! Transcription Context - Entities

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::DecodeOptions;

/// 用户选中的输入文件
///
/// 不变量:
/// - 创建后不可变
/// - display_url 由 local_path 推导，可被前端/后端直接解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    local_path: String,
    display_url: String,
}

impl SelectedFile {
    /// 将本地路径转换为资源 URL
    ///
    /// 整个路径作为单个 URL 段编码（`/` 编码为 `%2F`），与 WebView 资源协议的约定一致
    pub fn from_local_path(local_path: impl Into<String>, asset_base: &Url) -> Result<Self, &'static str> {
        let local_path = local_path.into();
        if local_path.is_empty() {
            return Err("文件路径不能为空");
        }

        let mut url = asset_base.clone();
        url.path_segments_mut()
            .map_err(|_| "资源 URL 前缀不能作为基础路径")?
            .pop_if_empty()
            .push(&local_path);

        Ok(Self {
            local_path,
            display_url: url.into(),
        })
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn display_url(&self) -> &str {
        &self.display_url
    }
}

/// 任务条目唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskEntryId(Uuid);

impl TaskEntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 任务条目：文件、解码参数与结果放在同一条记录里
///
/// 文件与参数因此天然按索引一一对应，不需要额外维护对齐。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    id: TaskEntryId,
    file: SelectedFile,
    options: DecodeOptions,
    result: Option<String>,
}

impl TaskEntry {
    /// 以默认解码参数创建条目
    pub fn new(file: SelectedFile) -> Self {
        Self {
            id: TaskEntryId::new(),
            file,
            options: DecodeOptions::default(),
            result: None,
        }
    }

    pub fn id(&self) -> TaskEntryId {
        self.id
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn set_options(&mut self, options: DecodeOptions) {
        self.options = options;
    }

    pub fn set_result(&mut self, result: String) {
        self.result = Some(result);
    }

    /// 生成提交给后端的任务单元
    pub fn to_task(&self) -> Task {
        Task {
            file_path: self.file.local_path.clone(),
            decode_option: self.options.clone(),
        }
    }
}

/// 提交给后端的任务单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub file_path: String,
    pub decode_option: DecodeOptions,
}
