use super::*;
use chrono::{SecondsFormat, Utc};
use nu_ansi_term::Color;
use std::fmt::Result;
use tracing::{Event, Level as TracingLevel, Metadata, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime, FmtContext, FormatEvent, FormatFields, FormattedFields},
    registry::LookupSpan,
};

/// Colours are on in debug builds, or whenever `APEX_LOG_COLORFUL` is set.
pub(crate) fn colorful_logs() -> bool {
    dotenvy::var("APEX_LOG_COLORFUL").is_ok() || cfg!(debug_assertions)
}

/// `TRACE` has no level of its own and shares the debug style.
pub(crate) fn level_of(level: &TracingLevel) -> Level {
    match *level {
        TracingLevel::ERROR => Level::Error,
        TracingLevel::WARN => Level::Warn,
        TracingLevel::INFO => Level::Info,
        TracingLevel::DEBUG | TracingLevel::TRACE => Level::Debug,
    }
}

pub struct LogTime;

impl LogTime {
    pub fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl FormatTime for LogTime {
    fn format_time(&self, w: &mut Writer<'_>) -> Result {
        write!(w, "{}", Self::now())
    }
}

pub struct ApexFormatter {
    theme: Theme,
    colorful: bool,
}

impl ApexFormatter {
    pub fn new(theme: Theme, colorful: bool) -> Self {
        Self { theme, colorful }
    }

    fn format_level(&self, level: &TracingLevel) -> String {
        let label = format!("{:>5}", level.as_str());
        if self.colorful {
            style::resolve_style(&self.theme, level_of(level)).paint(&label)
        } else {
            label
        }
    }

    fn write_log(&self, meta: &Metadata<'_>) -> String {
        let location = match (meta.file(), meta.line()) {
            (Some(file), Some(line)) => {
                let file = file.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(file);
                format!(" ({file}:{line})")
            }
            _ => String::new(),
        };

        if self.colorful {
            format!(
                "[{}][{}][{}]{} ",
                Color::DarkGray.paint(LogTime::now()),
                self.format_level(meta.level()),
                Color::LightMagenta.paint(meta.target()),
                location
            )
        } else {
            format!(
                "[{}][{}][{}]{} ",
                LogTime::now(),
                self.format_level(meta.level()),
                meta.target(),
                location
            )
        }
    }
}

impl<S, N> FormatEvent<S, N> for ApexFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> Result {
        let normalized_meta = event.normalized_metadata();
        let meta = normalized_meta.as_ref().unwrap_or_else(|| event.metadata());

        write!(&mut writer, "{}", self.write_log(meta))?;

        // Format all the spans in the event's span context.
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    // Skip formatting the fields if the span had no fields.
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        // Write fields on the event
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
