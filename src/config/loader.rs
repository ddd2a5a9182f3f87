//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（scribe-desk.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;
use url::Url;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["scribe-desk", "scribe-desk.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SCRIBE_DESK_`，层级分隔符 `__`）
/// 2. 配置文件（scribe-desk.toml 或 scribe-desk.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SCRIBE_DESK_BACKEND__URL=http://127.0.0.1:7070`
/// - `SCRIBE_DESK_COORDINATOR__BATCH_TIMEOUT_SECS=600`
/// - `SCRIBE_DESK_LOG__JSON=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("backend.url", "http://localhost:7070")?
        .set_default("backend.request_timeout_secs", 10)?
        .set_default("coordinator.poll_interval_ms", 2000)?
        .set_default("coordinator.batch_timeout_secs", 0)?
        .set_default("model.default_kind", "Base")?
        .set_default("files.extensions", vec!["m4a", "mp3"])?
        .set_default("files.asset_base_url", "asset://localhost/")?
        .set_default("output.copy_to_clipboard", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SCRIBE_DESK_BACKEND__URL=http://127.0.0.1:7070
    builder = builder.add_source(
        Environment::with_prefix("SCRIBE_DESK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.backend.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Backend URL cannot be empty".to_string(),
        ));
    }

    if config.coordinator.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Poll interval cannot be 0".to_string(),
        ));
    }

    if config.model.default_kind.is_empty() {
        return Err(ConfigError::ValidationError(
            "Default model kind cannot be empty".to_string(),
        ));
    }

    if config.files.extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "At least one file extension is required".to_string(),
        ));
    }

    Url::parse(&config.files.asset_base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "Invalid asset base URL '{}': {}",
            config.files.asset_base_url, e
        ))
    })?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Backend URL: {}", config.backend.url);
    tracing::info!("Backend Request Timeout: {}s", config.backend.request_timeout_secs);
    tracing::info!("Poll Interval: {}ms", config.coordinator.poll_interval_ms);
    match config.coordinator.batch_timeout() {
        Some(limit) => tracing::info!("Batch Timeout: {}s", limit.as_secs()),
        None => tracing::info!("Batch Timeout: unbounded"),
    }
    tracing::info!("Default Model: {}", config.model.default_kind);
    tracing::info!("File Extensions: {:?}", config.files.extensions);
    tracing::info!("Copy To Clipboard: {}", config.output.copy_to_clipboard);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
