//! 日志基础设施

use std::io;

use anyhow::Result;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// - 按日期分割的文件日志写入 `log_dir`
    /// - `console_output` 为真时同时输出到控制台
    /// - `RUST_LOG` 存在时覆盖配置中的级别
    ///
    /// 返回的 guard 必须存活到进程结束，否则缓冲中的日志会丢失。
    pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender = rolling::daily(&config.log_dir, &config.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.max_level().as_str().to_lowercase()));

        let console_layer = config
            .console_output
            .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_names(true),
            )
            .with(console_layer)
            .try_init()?;

        Ok(guard)
    }
}
