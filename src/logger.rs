use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Filter used when `RUST_LOG` is unset: this crate and its CLI at `info`,
/// dependencies (tiff, rayon) only at `warn`.
pub const DEFAULT_DIRECTIVE: &str = "warn,underwater_cc_rs=info,underwater_cc=info";

/// Installs the global subscriber. `RUST_LOG` overrides [`DEFAULT_DIRECTIVE`].
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // Span close events carry per-stage timings.
    let span_events = if wants_span_timings(&env_filter.to_string()) {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn wants_span_timings(directives: &str) -> bool {
    directives.contains("debug") || directives.contains("trace")
}
