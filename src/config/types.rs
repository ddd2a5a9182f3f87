//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::domain::model::DEFAULT_MODEL_KIND;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 转写后端配置
    #[serde(default)]
    pub backend: BackendConfig,

    /// 协调器配置
    #[serde(default)]
    pub coordinator: CoordinatorSection,

    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 文件选择配置
    #[serde(default)]
    pub files: FilesConfig,

    /// 结果输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 转写后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// 后端基础 URL
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// 状态查询超时时间（秒），0 表示不限制
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:7070".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// 协调器配置
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatorSection {
    /// 批次运行期间的模型状态轮询周期（毫秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// 批次超时（秒），0 表示不限制
    #[serde(default)]
    pub batch_timeout_secs: u64,
}

fn default_poll_interval() -> u64 {
    2000
}

impl Default for CoordinatorSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            batch_timeout_secs: 0,
        }
    }
}

impl CoordinatorSection {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn batch_timeout(&self) -> Option<Duration> {
        match self.batch_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// 启动时选中的模型
    #[serde(default = "default_model_kind")]
    pub default_kind: String,
}

fn default_model_kind() -> String {
    DEFAULT_MODEL_KIND.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_kind: default_model_kind(),
        }
    }
}

/// 文件选择配置
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// 允许的音频扩展名（不含点）
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// 本地路径转换为资源 URL 时使用的前缀
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,
}

fn default_extensions() -> Vec<String> {
    vec!["m4a".to_string(), "mp3".to_string()]
}

fn default_asset_base_url() -> String {
    "asset://localhost/".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            asset_base_url: default_asset_base_url(),
        }
    }
}

/// 结果输出配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// 批次完成后把全部结果复制到剪贴板
    #[serde(default)]
    pub copy_to_clipboard: bool,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
