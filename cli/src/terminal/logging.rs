use colored::*;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner::SpinnerWriter;

/// Default filter when neither a flag nor `RUST_LOG` says otherwise.
const DEFAULT_FILTER: &str = "info";

/// One line per event, prefixed with a coloured status symbol.
///
/// Debug and trace lines share `[?]` and name the module that emitted them,
/// so `-vv` output shows which probe said what.
pub struct DevscoutFormatter;

type Paint = fn(ColoredString) -> ColoredString;

impl<S, N> FormatEvent<S, N> for DevscoutFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let (symbol, paint) = symbol(meta.level());

        write!(writer, "{} ", paint(symbol.into()))?;
        if *meta.level() > Level::INFO {
            write!(writer, "{} ", format!("{}:", module_tag(meta.target())).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn symbol(level: &Level) -> (&'static str, Paint) {
    match *level {
        Level::TRACE | Level::DEBUG => ("[?]", |s| s.dimmed()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}

/// `devscout_core::probes::arp_table` → `arp_table`
fn module_tag(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Installs the global subscriber. Diagnostics go to stderr, above the spinner.
///
/// An explicit `level` (from `-v`/`-q`) wins over `RUST_LOG`.
pub fn init_logging(level: Option<LevelFilter>) {
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .event_format(DevscoutFormatter)
        .with_env_filter(filter)
        .with_writer(|| SpinnerWriter)
        .init();
}
