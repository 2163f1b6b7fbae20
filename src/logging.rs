// src/logging.rs

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(&self, _w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        Ok(())
    }
}

/// Install a stderr subscriber if `NOMOS_LOG` holds a filter directive.
///
/// `NOMOS_LOG_STYLE=full` adds timestamps; the default compact style omits
/// them. Calling this more than once, or after another subscriber was set,
/// does nothing.
pub fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("NOMOS_LOG") else {
        return;
    };
    let style = std::env::var("NOMOS_LOG_STYLE").unwrap_or_default();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let installed = if style == "full" {
        builder.try_init().is_ok()
    } else {
        builder.with_timer(NoTimestamp).try_init().is_ok()
    };
    if installed {
        tracing::debug!("tracing initialized");
    }
}
