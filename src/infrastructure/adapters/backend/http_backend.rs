//! HTTP Command Backend - 通过 HTTP 调用具名命令
//!
//! 实现 TranscriptionBackendPort trait，每个命令对应一个 JSON 请求:
//! POST {base_url}/invoke/{command}
//! Request: 命令参数 (JSON 对象，无参数时为 `{}`)
//! Response: 命令返回值 (JSON)，无返回值的命令忽略响应体

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::application::ports::{commands, BackendError, TranscriptionBackendPort};
use crate::domain::transcription::Task;

#[derive(Debug, Serialize)]
struct NoArgs {}

#[derive(Debug, Serialize)]
struct SetSelectedKindArgs<'a> {
    kind: &'a str,
}

#[derive(Debug, Serialize)]
struct RunBatchArgs {
    tasks: Vec<Task>,
}

/// HTTP 后端客户端配置
#[derive(Debug, Clone)]
pub struct HttpCommandBackendConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// 状态查询类命令的超时时间（秒）
    ///
    /// `transcription.run_batch` 不受此限制，批次超时由协调器控制
    pub request_timeout_secs: u64,
}

impl Default for HttpCommandBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7070".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl HttpCommandBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

/// HTTP 后端客户端
pub struct HttpCommandBackend {
    client: Client,
    config: HttpCommandBackendConfig,
}

impl HttpCommandBackend {
    /// 创建新的 HTTP 后端客户端
    pub fn new(config: HttpCommandBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取命令 URL
    fn command_url(&self, command: &str) -> String {
        format!(
            "{}/invoke/{}",
            self.config.base_url.trim_end_matches('/'),
            command
        )
    }

    fn query_timeout(&self) -> Option<Duration> {
        match self.config.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// 发送命令并返回原始响应
    async fn send<A: Serialize + ?Sized>(
        &self,
        command: &'static str,
        args: &A,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, BackendError> {
        let url = self.command_url(command);
        tracing::debug!(url = %url, command = command, "Invoking backend command");

        let mut request = self.client.post(&url).json(args);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else if e.is_connect() {
                BackendError::NetworkError(format!("Cannot connect to backend: {}", e))
            } else {
                BackendError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected {
                command,
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        Ok(response)
    }

    /// 发送命令并解析 JSON 返回值
    async fn invoke<A: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        command: &'static str,
        args: &A,
        timeout: Option<Duration>,
    ) -> Result<R, BackendError> {
        let response = self.send(command, args, timeout).await?;
        response.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::InvalidResponse(format!("{}: {}", command, e))
            }
        })
    }
}

#[async_trait]
impl TranscriptionBackendPort for HttpCommandBackend {
    async fn list_kinds(&self) -> Result<Vec<String>, BackendError> {
        self.invoke(commands::LIST_KINDS, &NoArgs {}, self.query_timeout())
            .await
    }

    async fn download_status(&self) -> Result<HashMap<String, bool>, BackendError> {
        self.invoke(commands::DOWNLOAD_STATUS, &NoArgs {}, self.query_timeout())
            .await
    }

    async fn is_loaded(&self) -> Result<bool, BackendError> {
        self.invoke(commands::IS_LOADED, &NoArgs {}, self.query_timeout())
            .await
    }

    async fn set_selected_kind(&self, kind: &str) -> Result<(), BackendError> {
        self.send(
            commands::SET_SELECTED_KIND,
            &SetSelectedKindArgs { kind },
            self.query_timeout(),
        )
        .await?;
        Ok(())
    }

    async fn unload(&self) -> Result<(), BackendError> {
        self.send(commands::UNLOAD, &NoArgs {}, self.query_timeout())
            .await?;
        Ok(())
    }

    async fn run_batch(&self, tasks: Vec<Task>) -> Result<Vec<String>, BackendError> {
        let count = tasks.len();
        let results: Vec<String> = self
            .invoke(commands::RUN_BATCH, &RunBatchArgs { tasks }, None)
            .await?;

        tracing::info!(
            submitted = count,
            returned = results.len(),
            "Batch response received"
        );
        Ok(results)
    }

    async fn task_progress(&self) -> Result<f32, BackendError> {
        self.invoke(commands::TASK_PROGRESS, &NoArgs {}, self.query_timeout())
            .await
    }
}
