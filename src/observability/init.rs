//! Tracing initialization and subscriber setup.

use super::{tracer, SERVICE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback filter when `trace_level` is unset or unparsable.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` from `config.trace_level`
/// in front of an OpenTelemetry layer exporting to the trace file.
///
/// Tracing is optional. If the data directory cannot be created the plugin
/// runs without a subscriber. Only the first call has an effect.
///
/// # Example
///
/// ```rust
/// use zatlas::observability::init_tracing;
/// use zatlas::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let filter = config
        .trace_level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL));

    let trace_file = crate::infrastructure::trace_file();
    if let Some(dir) = trace_file.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(trace_file, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
