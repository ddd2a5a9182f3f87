//! scribe-desk - 无界面转写驱动
//!
//! 登记命令行传入的音频文件，提交一个批次并打印结果

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use url::Url;

use scribe_desk::application::{
    ClipboardPort, CoordinatorConfig, StateStore, TaskCoordinator, TranscriptionBackendPort,
};
use scribe_desk::config::{load_config, load_config_from_path, print_config, AppConfig};
use scribe_desk::domain::model::{ModelKind, ModelState};
use scribe_desk::infrastructure::adapters::{
    ArboardClipboard, FakeBackend, HttpCommandBackend, HttpCommandBackendConfig, PresetFilePicker,
};
use scribe_desk::infrastructure::{EventPublisher, InMemoryTaskQueue, ModelPoller};

#[derive(Debug, Parser)]
#[command(name = "scribe-desk", version, about = "Batch transcription driver")]
struct Cli {
    /// 待转写的音频文件
    paths: Vec<String>,

    /// 使用进程内 Fake 后端，不连接转写服务
    #[arg(long)]
    dry_run: bool,

    /// 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的默认模型
    #[arg(long)]
    model: Option<String>,

    /// 完成后把结果复制到剪贴板
    #[arg(long)]
    copy: bool,
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},scribe_desk={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_backend(
    config: &AppConfig,
    dry_run: bool,
) -> anyhow::Result<Arc<dyn TranscriptionBackendPort>> {
    if dry_run {
        tracing::info!("Dry run: using in-process fake backend");
        return Ok(Arc::new(FakeBackend::with_defaults()));
    }

    let backend_config = HttpCommandBackendConfig::new(&config.backend.url)
        .with_timeout(config.backend.request_timeout_secs);
    Ok(Arc::new(HttpCommandBackend::new(backend_config)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match cli.config.as_deref() {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .context("Failed to load config")?;

    init_tracing(&config);
    tracing::info!("scribe-desk - batch transcription driver");
    print_config(&config);

    let asset_base = Url::parse(&config.files.asset_base_url)
        .context("Invalid files.asset_base_url")?;

    let backend = build_backend(&config, cli.dry_run)?;
    let events = EventPublisher::new().arc();
    let state = StateStore::new(ModelState::default(), events.clone()).arc();
    let queue = InMemoryTaskQueue::new(asset_base).arc();
    let poller = ModelPoller::new(backend.clone(), state.clone()).arc();

    let coordinator = TaskCoordinator::new(
        CoordinatorConfig {
            poll_interval: config.coordinator.poll_interval(),
            batch_timeout: config.coordinator.batch_timeout(),
            file_extensions: config.files.extensions.clone(),
        },
        backend,
        queue,
        poller,
        state,
        events,
    );

    coordinator.initialize().await?;

    let kind = cli.model.as_deref().unwrap_or(&config.model.default_kind);
    if let Err(e) = kind.parse::<ModelKind>() {
        // 后端可能提供内置列表之外的模型，仍然照常提交
        tracing::warn!(error = %e, "Model kind not in the built-in list");
    }
    if coordinator.model_state().selected_kind != kind {
        coordinator.change_selected_kind(kind).await?;
    }

    let picker = PresetFilePicker::new(cli.paths);
    let registered = coordinator.select_files(&picker).await?;
    if registered == 0 {
        tracing::warn!("No audio files to transcribe");
        return Ok(());
    }

    let results = coordinator.run().await?;
    for entry in coordinator.entries() {
        println!("==> {}", entry.file().local_path());
        println!("{}", entry.result().unwrap_or_default());
    }

    if cli.copy || config.output.copy_to_clipboard {
        ArboardClipboard.copy(&results.join("\n\n"));
        tracing::info!(count = results.len(), "Results copied to clipboard");
    }

    coordinator.shutdown();
    Ok(())
}
