//! OpenTelemetry tracing with file-based OTLP export.
//!
//! The plugin runs inside Zellij's WASM sandbox with no collector to talk to,
//! so spans are serialized as OTLP JSON and appended to a rotating file:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → zatlas-otlp.json
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: `~/.local/share/zellij/zatlas/zatlas-otlp.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **OTLP Format**: One `resourceSpans` document per line
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `zatlas::source=trace`) and defaults to
//! `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Size-rotated append-only writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "zatlas";
