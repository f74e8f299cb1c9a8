use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub is_dev: bool,
    pub enable_file: bool,
    pub json: bool,
    pub log_dir: Option<String>,
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber.
///
/// Console output is always on, pretty-printed unless `json` is set. With
/// `enable_file`, a daily rolling JSON file is written under `log_dir`
/// (`./logs` in dev mode, `/var/log/app` otherwise). The returned guard must
/// be held for the life of the process so buffered lines get flushed.
pub fn init_logger(component: &str, options: &LogOptions) -> Option<WorkerGuard> {
    let console_layer = if options.json {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_filter(env_filter("info"))
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(options.is_dev)
            .with_filter(env_filter("info"))
            .boxed()
    };

    let (file_layer, guard) = if options.enable_file {
        let log_dir = options.log_dir.clone().unwrap_or_else(|| {
            if options.is_dev {
                "./logs".to_string()
            } else {
                "/var/log/app".to_string()
            }
        });

        let file_name = format!("{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"))
            .boxed();

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let installed = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = installed {
        eprintln!("logger already initialised for {component}: {e}");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_hands_back_a_flush_guard() {
        let log_dir = std::env::temp_dir().join("catalog-logs-test");
        let options = LogOptions {
            is_dev: true,
            enable_file: true,
            json: false,
            log_dir: Some(log_dir.to_string_lossy().into_owned()),
        };

        let guard = init_logger("catalog-test", &options);
        assert!(guard.is_some());
        tracing::info!("file logger installed");

        assert!(init_logger("catalog-test", &LogOptions::default()).is_none());
    }
}
