use buildplan_core::constants::BUILDPLAN_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tracing::{span, Level, Span};

/// Default filter when neither the environment nor the caller picks one
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the tracing system
///
/// The filter comes from `BUILDPLAN_LOG` when set, then from `fallback`, then
/// [`DEFAULT_FILTER`]. Output goes to stderr so stdout stays clean for plans.
pub fn init(fallback: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = resolve_filter(std::env::var(BUILDPLAN_LOG_VAR).ok().as_deref(), fallback)?;

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

fn resolve_filter(
    from_env: Option<&str>,
    fallback: Option<&str>,
) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    let directives = from_env
        .filter(|value| !value.trim().is_empty())
        .or(fallback)
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives)
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for one pipeline stage
pub fn stage_span(stage: &'static str, modules: usize) -> Span {
    span!(Level::INFO, "stage", stage = stage, modules = modules)
}
