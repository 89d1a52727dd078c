//! Tracing subscriber setup.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

/// Opens `path` as a non-rotating appender behind a background writer.
///
/// The returned guard flushes pending lines when dropped.
fn file_writer(path: &Path) -> Result<(BoxMakeWriter, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(non_blocking), guard))
}

/// Installs the global subscriber.
///
/// Logs go to stdout, or are appended to `log_file` when given (the
/// terminal UI owns the screen). With the `otel` feature, spans are also
/// exported when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// Keep the returned guard alive until exit so buffered file output is
/// flushed.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let (writer, ansi, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (writer, false, Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), true, None),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[test]
    fn test_file_writer_appends_to_existing_log() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedb.log");
        std::fs::write(&path, "earlier\n").unwrap();

        // Act
        let (writer, guard) = file_writer(&path).unwrap();
        writer.make_writer().write_all(b"later\n").unwrap();
        drop(guard);

        // Assert
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier\nlater\n");
    }

    #[test]
    fn test_file_writer_creates_missing_directory() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("moviedb.log");

        // Act
        let (writer, guard) = file_writer(&path).unwrap();
        writer.make_writer().write_all(b"started\n").unwrap();
        drop(guard);

        // Assert
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "started\n");
    }

    #[test]
    fn test_file_writer_rejects_path_without_file_name() {
        // Arrange & Act
        let result = file_writer(Path::new("/"));

        // Assert
        assert!(result.is_err());
    }
}
