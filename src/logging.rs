use chrono::Local;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event format for the CLI log stream: the bare message, optionally
/// prefixed with the local `HH:MM:SS` time.
///
/// Clones share the timestamp switch, so the handle returned by [`init`]
/// can turn timestamps on after the subscriber is installed.
#[derive(Debug, Clone, Default)]
pub struct LogFormat {
    timestamps: Arc<AtomicBool>,
}

impl LogFormat {
    pub fn enable_timestamps(&self) {
        self.timestamps.store(true, Ordering::Relaxed);
    }

    pub fn timestamps_enabled(&self) -> bool {
        self.timestamps.load(Ordering::Relaxed)
    }
}

impl<S, N> FormatEvent<S, N> for LogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if self.timestamps_enabled() {
            write!(writer, "{} ", Local::now().format("%H:%M:%S"))?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, then `LOG_LEVEL`, defaulting to `info`.
pub fn init() -> LogFormat {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let format = LogFormat::default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .event_format(format.clone())
        .init();

    format
}
