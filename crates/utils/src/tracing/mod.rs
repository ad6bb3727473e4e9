use feedwatch_core::FEEDWATCH_LOG_VAR;
use tracing::{span, Level, Span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// The filter comes from `FEEDWATCH_LOG`, then `RUST_LOG`, then defaults to
/// `info`. Output goes to stderr; ANSI colours only when stderr is a terminal.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = build_filter(std::env::var(FEEDWATCH_LOG_VAR).ok().as_deref());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for one monitoring cycle
pub fn cycle_span(total_sources: usize) -> Span {
    span!(Level::INFO, "cycle", total_sources = %total_sources)
}

/// Create a span for processing one tracked source
pub fn source_span(name: &str) -> Span {
    span!(Level::INFO, "source", source = %name)
}
