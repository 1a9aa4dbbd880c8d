//! # Diagnostics
//!
//! Renders `tracing` events as the single-line stderr format the platform's
//! log scraping expects:
//!
//! ```text
//! [mattermost-alert] [<level>] <message>: <arg> <arg> ...
//! ```
//!
//! The `: ` suffix is only written when the event carries fields besides the
//! message. Field values are written in recording order, separated by a
//! single space. Debug events use the level text `--> debug <--`.

use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Tag written at the start of every diagnostic line
pub const DIAGNOSTIC_TAG: &str = "[mattermost-alert]";

/// Event formatter producing the alert action's diagnostic lines
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticFormat;

impl<S, N> FormatEvent<S, N> for DiagnosticFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = DiagnosticVisitor::default();
        event.record(&mut visitor);

        writeln!(
            writer,
            "{}",
            render_line(level_label(event.metadata().level()), &visitor.message, &visitor.args)
        )
    }
}

/// Level text shown between the second pair of brackets
pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warn",
        Level::INFO => "info",
        Level::DEBUG => "--> debug <--",
        _ => "trace",
    }
}

/// Assemble one diagnostic line (without the trailing newline)
pub fn render_line(level: &str, message: &str, args: &[String]) -> String {
    let mut line = format!("{} [{}] {}", DIAGNOSTIC_TAG, level, message);
    if !args.is_empty() {
        line.push_str(": ");
        line.push_str(&args.join(" "));
    }
    line
}

/// Collects the message and the remaining field values of an event
#[derive(Debug, Default)]
struct DiagnosticVisitor {
    message: String,
    args: Vec<String>,
}

impl Visit for DiagnosticVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.args.push(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.args.push(format!("{:?}", value));
        }
    }
}

/// Filter directives for the requested verbosity
///
/// Third-party crates (HTTP stack) stay at `warn` so that only the action's
/// own lines reach stderr.
pub fn filter_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!(
        "warn,mattermost_alert={level},mattermost_alert_cli={level},mattermost_alert_core={level}"
    )
}

/// Install the global stderr subscriber
///
/// Debug events are only emitted when `debug` is set.
pub fn init_diagnostics(debug: bool) -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(filter_directives(debug)))
        .event_format(DiagnosticFormat)
        .try_init()
        .map_err(|e| CliError::Diagnostics {
            message: e.to_string(),
        })
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
