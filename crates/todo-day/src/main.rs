/*
[INPUT]:  CLI arguments, optional YAML configuration file, TODO_DAY_* environment
[OUTPUT]: One-shot task commands, the interactive menu, or the full-screen TUI
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or logging setup
*/

mod cli;
mod context;
mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use todo_day_core::{AppConfig, Clipboard, SystemClipboard, ValidationPolicy};

use crate::cli::Command;
use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

const CLI_LOG_LEVEL: &str = "warn";
const TUI_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "todo-day", version, about = "A short list of things to do today")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    /// Trim edited text and ignore blank edits
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

enum LogSink {
    Stderr,
    Buffer(LogBufferHandle),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = load_config(&args)?;
    let clipboard: Arc<dyn Clipboard> = Arc::new(SystemClipboard::new());

    match args.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let log_buffer: LogBufferHandle =
                Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
            let _guard = init_tracing(
                log_level(&config, TUI_LOG_LEVEL),
                LogSink::Buffer(log_buffer.clone()),
                config.log_file.as_deref(),
            )?;
            let store = context::open_store(&config)?;
            info!(key = %store.key(), tasks = store.len(), "starting tui");
            tui::run_tui(
                store,
                clipboard,
                log_buffer,
                Duration::from_millis(config.tick_rate_ms),
            )
            .await
        }
        Command::Interactive => {
            let _guard = init_tracing(
                log_level(&config, CLI_LOG_LEVEL),
                LogSink::Stderr,
                config.log_file.as_deref(),
            )?;
            let store = context::open_store(&config)?;
            cli::interactive::run_interactive(store, clipboard).await
        }
        command => {
            let _guard = init_tracing(
                log_level(&config, CLI_LOG_LEVEL),
                LogSink::Stderr,
                config.log_file.as_deref(),
            )?;
            let mut store = context::open_store(&config)?;
            let mut stdout = std::io::stdout().lock();
            cli::run_command(&mut store, clipboard, command, &mut stdout).await
        }
    }
}

fn load_config(args: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(level) = &args.log_level {
        config.log_level = Some(level.clone());
    }
    if args.strict {
        config.validation = ValidationPolicy::Strict;
    }
    config.validate().context("validate config")?;
    Ok(config)
}

fn log_level<'a>(config: &'a AppConfig, mode_default: &'a str) -> &'a str {
    config.log_level.as_deref().unwrap_or(mode_default)
}

/// `RUST_LOG` wins over the configured level. The returned guard must live
/// until exit so the log file is flushed.
fn init_tracing(
    log_level: &str,
    sink: LogSink,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::try_from_default_env().map_err(anyhow::Error::from),
        Err(_) => EnvFilter::try_new(log_level).map_err(anyhow::Error::from),
    }
    .context("invalid log level")?;

    let (writer, ansi) = match sink {
        LogSink::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogSink::Buffer(buffer) => (BoxMakeWriter::new(LogWriterFactory::new(buffer)), false),
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .context("log_file must name a file")?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
