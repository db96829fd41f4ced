//! Tracing subscriber initialization.
//!
//! # Usage
//!
//! ```no_run
//! // Structured logging only
//! confab_observe::tracing_setup::init_tracing(false).unwrap();
//!
//! // Also export session spans to stdout through OpenTelemetry
//! confab_observe::tracing_setup::init_tracing(true).unwrap();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use std::sync::OnceLock;

/// Kept so the provider can be flushed on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,confab_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global tracing subscriber.
///
/// - Always installs a `fmt` layer with targets and span close timing, so
///   every orchestrator operation logs its duration when it finishes.
/// - When `enable_otel` is true, session spans are also bridged to
///   OpenTelemetry using the stdout exporter.
/// - Respects `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(enable_otel: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("confab");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Install a subscriber that writes through the test harness capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}

/// Flush pending spans and shut down the OpenTelemetry provider.
///
/// No-op when OpenTelemetry was never enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
