use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the process-wide subscriber: daily JSON file, console, and an
/// OpenTelemetry log bridge outside development.
pub struct Logger {
    provider: Option<SdkLoggerProvider>,
}

impl Logger {
    pub fn new(component: &str, is_dev: bool) -> Self {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_name = format!("{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        let console_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let console_layer = fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(is_dev)
            .with_filter(console_filter);

        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        let provider = if is_dev {
            None
        } else {
            Some(SdkLoggerProvider::builder().build())
        };

        match &provider {
            Some(provider) => {
                let otel_filter =
                    EnvFilter::new("info,hyper=off,opentelemetry=off,h2=off,reqwest=off,sqlx=off");

                let _ = registry
                    .with(OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter))
                    .try_init();
            }
            None => {
                let _ = registry.try_init();
            }
        }

        std::mem::forget(guard);

        Self { provider }
    }

    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to flush log provider: {e}");
            }
        }
    }
}
